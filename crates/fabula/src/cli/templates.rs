//! Templates command handler.

use fabula::{FabulaResult, Theme};

/// Print the template cast for a theme.
pub fn show_templates(theme: &str) -> FabulaResult<()> {
    let theme = Theme::parse(theme)?;
    for draft in theme.character_templates() {
        println!("{} ({})", draft.name, draft.role);
        println!("  {}", draft.description);
        println!("  traits: {}", draft.traits.join(", "));
        println!("  looks: {}", draft.appearance.summary());
    }
    Ok(())
}
