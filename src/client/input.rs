//! Raw input symbols to commands
//!
//! Symbols are DOM-style key codes (`ArrowLeft`, `KeyA`) and pan gesture
//! names (`panleft`). Several symbols map to each direction.

use crate::codec::Command;

/// Every recognised symbol and the command it produces
pub static BINDINGS: [(&str, Command); 18] = [
    ("ArrowLeft", Command::Left),
    ("KeyA", Command::Left),
    ("KeyJ", Command::Left),
    ("panleft", Command::Left),
    ("ArrowUp", Command::Up),
    ("KeyW", Command::Up),
    ("KeyI", Command::Up),
    ("panup", Command::Up),
    ("ArrowRight", Command::Right),
    ("KeyD", Command::Right),
    ("KeyL", Command::Right),
    ("panright", Command::Right),
    ("ArrowDown", Command::Down),
    ("KeyS", Command::Down),
    ("KeyK", Command::Down),
    ("pandown", Command::Down),
    ("Escape", Command::Quit),
    ("KeyQ", Command::Quit),
];

/// Map one input symbol to a command; unknown symbols yield `None`
pub fn map_input(symbol: &str) -> Option<Command> {
    BINDINGS
        .iter()
        .find(|(s, _)| *s == symbol)
        .map(|(_, command)| command.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synonyms_agree() {
        for (symbols, expected) in [
            (["ArrowLeft", "KeyA", "KeyJ", "panleft"], Command::Left),
            (["ArrowUp", "KeyW", "KeyI", "panup"], Command::Up),
            (["ArrowRight", "KeyD", "KeyL", "panright"], Command::Right),
            (["ArrowDown", "KeyS", "KeyK", "pandown"], Command::Down),
        ] {
            for symbol in symbols {
                assert_eq!(map_input(symbol), Some(expected.clone()), "{symbol}");
            }
        }
        assert_eq!(map_input("Escape"), Some(Command::Quit));
    }

    #[test]
    fn test_unknown_symbols() {
        assert_eq!(map_input("KeyZ"), None);
        assert_eq!(map_input(""), None);
        // case sensitive, like the key codes themselves
        assert_eq!(map_input("arrowleft"), None);
    }

    #[test]
    fn test_table_has_no_duplicate_symbols() {
        let mut symbols: Vec<_> = BINDINGS.iter().map(|(s, _)| *s).collect();
        symbols.sort_unstable();
        symbols.dedup();
        assert_eq!(symbols.len(), BINDINGS.len());
        let downs = BINDINGS.iter().filter(|(_, c)| *c == Command::Down).count();
        assert_eq!(downs, 4);
    }

    #[test]
    fn test_no_echo_binding() {
        assert!(BINDINGS.iter().all(|(_, c)| !matches!(c, Command::KeepaliveEcho(_))));
    }
}
