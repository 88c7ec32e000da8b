use canopy_admin::AdminShell;
use canopy_core::preview::bundle_savings;
use canopy_core::{BundleConditions, EntityId};
use clap::Subcommand;

use crate::notifier::TerminalNotifier;

#[derive(Debug, Subcommand)]
pub enum BundleCommands {
    /// List bundles with their composition
    List,
    /// Delete a bundle
    Delete { id: EntityId },
}

pub(crate) async fn run(
    shell: &mut AdminShell<TerminalNotifier>,
    command: BundleCommands,
) -> anyhow::Result<()> {
    match command {
        BundleCommands::List => {
            print_bundles(shell);
            Ok(())
        }
        BundleCommands::Delete { id } => {
            let outcome = shell.delete_bundle(id).await;
            crate::finish(outcome, "bundle deleted")
        }
    }
}

fn print_bundles(shell: &AdminShell<TerminalNotifier>) {
    let bundles = shell.bundles();
    if bundles.is_empty() {
        println!("no bundles");
        return;
    }
    for b in bundles {
        let price = canopy_core::format_display_price(b.value);
        match bundle_savings(b, shell.products()) {
            Some((amount, percent)) => println!(
                "{:<6}{} {price} (saves {} / {}%)",
                b.id,
                b.name,
                canopy_core::format_display_price(amount),
                percent.round_dp(0)
            ),
            None => println!("{:<6}{} {price}", b.id, b.name),
        }
        match &b.conditions {
            BundleConditions::Specific {
                specific_products, ..
            } => {
                for item in specific_products {
                    let name = shell
                        .products()
                        .iter()
                        .find(|p| p.id == item.product_id)
                        .map_or("unknown product", |p| p.name.as_str());
                    println!("      {} x {name}", item.quantity);
                }
            }
            BundleConditions::Category {
                category_requirements,
            } => {
                for req in category_requirements {
                    println!("      {} x any {}", req.quantity, req.category.label());
                }
            }
        }
    }
}
