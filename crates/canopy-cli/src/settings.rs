use canopy_admin::AdminShell;
use clap::Subcommand;

use crate::notifier::TerminalNotifier;

#[derive(Debug, Subcommand)]
pub enum SettingsCommands {
    /// Print the current menu settings
    Show,
    /// Restore server defaults
    Reset,
}

pub(crate) async fn run(
    shell: &mut AdminShell<TerminalNotifier>,
    command: SettingsCommands,
) -> anyhow::Result<()> {
    match command {
        SettingsCommands::Show => {
            let settings = shell.settings();
            let order: Vec<&str> = settings
                .ordered_categories()
                .into_iter()
                .map(|c| c.label())
                .collect();
            println!("category order:    {}", order.join(", "));
            println!("show out of stock: {}", settings.show_out_of_stock);
            println!(
                "featured category: {}",
                settings.featured_category.map_or("none", |c| c.label())
            );
            println!(
                "announcement:      {}",
                settings.announcement.as_deref().unwrap_or("none")
            );
            for (key, value) in &settings.extra {
                println!("{key}: {value}");
            }
            Ok(())
        }
        SettingsCommands::Reset => {
            let outcome = shell.reset_settings().await;
            crate::finish(outcome, "menu settings reset to defaults")
        }
    }
}
