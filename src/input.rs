// Pure keyboard decision helpers shared by the hotspot layer and the global
// shortcut handler. No DOM access here so the rules can be tested on the host.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// What a focused hotspot button should do with a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKey {
    Ignore,
    /// Swallow the default action (Space would scroll the page).
    Suppress,
    Activate,
}

#[inline]
fn is_space(key: &str, code: &str) -> bool {
    code == "Space" || key == " "
}

/// Enter activates on keydown for immediacy; Space activates on keyup to
/// match native button semantics.
#[inline]
pub fn button_key_action(phase: KeyPhase, key: &str, code: &str) -> ButtonKey {
    match phase {
        KeyPhase::Down if is_space(key, code) => ButtonKey::Suppress,
        KeyPhase::Down if key == "Enter" => ButtonKey::Activate,
        KeyPhase::Up if is_space(key, code) => ButtonKey::Activate,
        _ => ButtonKey::Ignore,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleParallax,
    ToggleDebugOverlay,
}

#[inline]
pub fn shortcut_for_key(key: &str, repeat: bool, modified: bool) -> Option<Shortcut> {
    if repeat || modified {
        return None;
    }
    match key {
        "m" | "M" => Some(Shortcut::ToggleParallax),
        "d" | "D" => Some(Shortcut::ToggleDebugOverlay),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavMove {
    Next,
    Prev,
    First,
    Last,
}

#[inline]
pub fn nav_move_for_key(key: &str) -> Option<NavMove> {
    match key {
        "ArrowRight" | "ArrowDown" => Some(NavMove::Next),
        "ArrowLeft" | "ArrowUp" => Some(NavMove::Prev),
        "Home" => Some(NavMove::First),
        "End" => Some(NavMove::Last),
        _ => None,
    }
}

/// Index to focus among `len` buttons. An unknown current index counts as 0.
#[inline]
pub fn nav_target(current: Option<usize>, len: usize, mv: NavMove) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = current.filter(|&i| i < len).unwrap_or(0);
    Some(match mv {
        NavMove::Next => (i + 1) % len,
        NavMove::Prev => (i + len - 1) % len,
        NavMove::First => 0,
        NavMove::Last => len - 1,
    })
}
