//! Static action menu.

use crate::actions::Action;

/// One line of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEntry {
    Run(Action),
    SetTransactionCount,
    Exit,
}

impl MenuEntry {
    pub fn label(&self) -> &'static str {
        match self {
            MenuEntry::Run(action) => action.label(),
            MenuEntry::SetTransactionCount => "Set Tx Count",
            MenuEntry::Exit => "Exit",
        }
    }
}

/// Entries in display order.
pub fn entries() -> Vec<MenuEntry> {
    Action::ALL
        .into_iter()
        .map(MenuEntry::Run)
        .chain([MenuEntry::SetTransactionCount, MenuEntry::Exit])
        .collect()
}

/// Map 1-based input to an entry.
pub fn parse_choice(input: &str) -> Option<MenuEntry> {
    let n: usize = input.trim().parse().ok()?;
    entries().get(n.checked_sub(1)?).copied()
}

/// Numbered menu text.
pub fn render(max_transactions: u32) -> String {
    let mut out = format!("\nMax transactions per wallet: {}\n", max_transactions);
    for (i, entry) in entries().iter().enumerate() {
        out.push_str(&format!("{:>2}. {}\n", i + 1, entry.label()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), Some(MenuEntry::Run(Action::Login)));
        assert_eq!(parse_choice(" 6 \n"), Some(MenuEntry::Run(Action::SwapUsdc)));
        assert_eq!(parse_choice("12"), Some(MenuEntry::Run(Action::GeneratedFaucet)));
        assert_eq!(parse_choice("13"), Some(MenuEntry::SetTransactionCount));
        assert_eq!(parse_choice("14"), Some(MenuEntry::Exit));
    }

    #[test]
    fn test_invalid_choice() {
        assert_eq!(parse_choice("0"), None);
        assert_eq!(parse_choice("15"), None);
        assert_eq!(parse_choice("swap"), None);
        assert_eq!(parse_choice(""), None);
        assert_eq!(parse_choice("-1"), None);
    }

    #[test]
    fn test_render_lists_every_entry() {
        let text = render(3);
        assert!(text.contains("Max transactions per wallet: 3"));
        assert!(text.contains(" 1. Login"));
        assert!(text.contains(" 8. Add LP PHRS-USDC"));
        assert!(text.contains("14. Exit"));
    }
}
