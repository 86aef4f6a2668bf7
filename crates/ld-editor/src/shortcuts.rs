//! Keyboard shortcut table.
//!
//! One static binding list shared by every host. Keys are matched
//! case-insensitively, and the shifted forms of `[`, `]` and `=` are folded
//! onto their base keys.

use crate::input::Modifiers;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShortcutAction {
    Undo,
    Redo,
    Delete,
    SelectAll,
    Duplicate,
    Deselect,
    FlipHorizontal,
    FlipVertical,

    ZoomIn,
    ZoomOut,
    ResetView,
    ToggleGrid,

    SendBackward,
    BringForward,
    SendToBack,
    BringToFront,
}

/// Which modifier set a binding requires. Ctrl and ⌘ both count as `Cmd`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Chord {
    Bare,
    Shift,
    Cmd,
    CmdShift,
}

use Chord::*;
use ShortcutAction as A;

const BINDINGS: &[(Chord, &str, ShortcutAction)] = &[
    (Bare, "delete", A::Delete),
    (Bare, "backspace", A::Delete),
    (Bare, "escape", A::Deselect),
    (Shift, "h", A::FlipHorizontal),
    (Shift, "v", A::FlipVertical),
    (Cmd, "z", A::Undo),
    (Cmd, "y", A::Redo),
    (Cmd, "a", A::SelectAll),
    (Cmd, "d", A::Duplicate),
    (Cmd, "=", A::ZoomIn),
    (Cmd, "-", A::ZoomOut),
    (Cmd, "0", A::ResetView),
    (Cmd, "'", A::ToggleGrid),
    (Cmd, "[", A::SendBackward),
    (Cmd, "]", A::BringForward),
    (CmdShift, "z", A::Redo),
    (CmdShift, "=", A::ZoomIn),
    (CmdShift, "[", A::SendToBack),
    (CmdShift, "]", A::BringToFront),
];

pub struct ShortcutMap;

impl ShortcutMap {
    /// `key` is a `KeyboardEvent.key`-style name (`"z"`, `"Delete"`, `"["`).
    /// Alt combos are never bound; modified Delete/Backspace stay with the
    /// host.
    pub fn resolve(
        key: &str,
        ctrl: bool,
        shift: bool,
        alt: bool,
        meta: bool,
    ) -> Option<ShortcutAction> {
        Self::lookup(key, Modifiers { shift, ctrl, alt, meta })
    }

    pub fn lookup(key: &str, modifiers: Modifiers) -> Option<ShortcutAction> {
        if modifiers.alt {
            return None;
        }
        let chord = match (modifiers.command(), modifiers.shift) {
            (true, true) => CmdShift,
            (true, false) => Cmd,
            (false, true) => Shift,
            (false, false) => Bare,
        };
        let key = normalize(key);
        BINDINGS
            .iter()
            .find(|(c, k, _)| *c == chord && *k == key)
            .map(|(_, _, action)| *action)
    }
}

fn normalize(key: &str) -> String {
    match key {
        "{" => "[".to_string(),
        "}" => "]".to_string(),
        "+" => "=".to_string(),
        _ => key.to_ascii_lowercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Modifiers::NONE
    };
    const META: Modifiers = Modifiers {
        meta: true,
        ..Modifiers::NONE
    };
    const CTRL_SHIFT: Modifiers = Modifiers {
        ctrl: true,
        shift: true,
        ..Modifiers::NONE
    };

    fn check(cases: &[(&str, Modifiers, Option<ShortcutAction>)]) {
        for (key, mods, expected) in cases {
            let got = ShortcutMap::lookup(key, *mods);
            assert_eq!(got, *expected, "key {key:?} with {mods:?}");
        }
    }

    #[test]
    fn history_keys_on_both_platforms() {
        check(&[
            ("z", CTRL, Some(A::Undo)),
            ("z", META, Some(A::Undo)),
            ("Z", CTRL_SHIFT, Some(A::Redo)),
            ("y", CTRL, Some(A::Redo)),
            ("z", Modifiers::NONE, None),
        ]);
    }

    #[test]
    fn delete_only_without_modifiers() {
        check(&[
            ("Delete", Modifiers::NONE, Some(A::Delete)),
            ("Backspace", Modifiers::NONE, Some(A::Delete)),
            ("Delete", META, None),
            ("Backspace", CTRL, None),
            ("Backspace", CTRL_SHIFT, None),
            ("Escape", Modifiers::NONE, Some(A::Deselect)),
        ]);
    }

    #[test]
    fn layer_order_brackets() {
        check(&[
            ("[", CTRL, Some(A::SendBackward)),
            ("]", META, Some(A::BringForward)),
            ("{", CTRL_SHIFT, Some(A::SendToBack)),
            ("]", CTRL_SHIFT, Some(A::BringToFront)),
        ]);
    }

    #[test]
    fn view_and_flip_keys() {
        check(&[
            ("+", CTRL, Some(A::ZoomIn)),
            ("+", CTRL_SHIFT, Some(A::ZoomIn)),
            ("-", META, Some(A::ZoomOut)),
            ("0", CTRL, Some(A::ResetView)),
            ("'", CTRL, Some(A::ToggleGrid)),
            ("H", Modifiers::SHIFT, Some(A::FlipHorizontal)),
            ("v", Modifiers::SHIFT, Some(A::FlipVertical)),
            ("h", Modifiers::NONE, None),
        ]);
    }

    #[test]
    fn alt_and_unbound_keys_resolve_to_nothing() {
        assert_eq!(ShortcutMap::resolve("z", true, false, true, false), None);
        assert_eq!(ShortcutMap::resolve("Delete", false, false, true, false), None);
        assert_eq!(ShortcutMap::resolve("q", false, false, false, false), None);
        assert_eq!(ShortcutMap::resolve("d", false, false, false, true), Some(A::Duplicate));
    }
}
