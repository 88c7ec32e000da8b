//! `pricing` and `specials` command handlers.

use canopy_admin::AdminShell;
use canopy_core::{EntityId, ProductCategory, RuleType};
use chrono::NaiveDate;
use clap::{Subcommand, ValueEnum};

use crate::notifier::TerminalNotifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PricingTarget {
    Rule,
    Tier,
}

#[derive(Debug, Subcommand)]
pub enum PricingCommands {
    /// List pricing rules, highest priority first
    List,
    /// Show base price tiers grouped by category
    Tiers,
    /// Create a pricing rule
    AddRule {
        #[arg(long)]
        name: String,
        /// percentage_discount, fixed_discount, fixed_price, special, or bundle
        #[arg(long = "type", default_value = "percentage_discount")]
        rule_type: RuleType,
        #[arg(long)]
        value: String,
        /// Omit to apply to every category
        #[arg(long)]
        category: Option<ProductCategory>,
        #[arg(long, default_value = "0")]
        priority: i32,
        /// YYYY-MM-DD
        #[arg(long)]
        valid_from: Option<NaiveDate>,
        /// YYYY-MM-DD
        #[arg(long)]
        valid_until: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        inactive: bool,
    },
    /// Create a base price tier
    AddTier {
        #[arg(long)]
        category: ProductCategory,
        /// Tier label, e.g. 3.5g or "2 packs"
        #[arg(long)]
        tier: String,
        #[arg(long)]
        price: String,
    },
    /// Delete a pricing rule or base price tier
    Delete {
        #[arg(value_enum)]
        target: PricingTarget,
        id: EntityId,
    },
}

#[derive(Debug, Subcommand)]
pub enum SpecialCommands {
    /// List specials
    List,
    /// Flip a special between active and inactive
    Toggle { id: EntityId },
}

pub(crate) async fn run_pricing(
    shell: &mut AdminShell<TerminalNotifier>,
    command: PricingCommands,
) -> anyhow::Result<()> {
    match command {
        PricingCommands::List => {
            print_rules(shell);
            Ok(())
        }
        PricingCommands::Tiers => {
            print_tiers(shell);
            Ok(())
        }
        PricingCommands::AddRule {
            name,
            rule_type,
            value,
            category,
            priority,
            valid_from,
            valid_until,
            description,
            inactive,
        } => {
            let draft = shell.rule_panel_mut().open_modal();
            draft.name = name;
            draft.rule_type = rule_type;
            draft.value = value;
            draft.category = category;
            draft.priority = priority;
            draft.valid_from = valid_from;
            draft.valid_until = valid_until;
            draft.description = description.unwrap_or_default();
            draft.is_active = !inactive;
            let outcome = shell.submit_new_rule().await;
            crate::finish(outcome, "pricing rule created")
        }
        PricingCommands::AddTier {
            category,
            tier,
            price,
        } => {
            let draft = shell.tier_panel_mut().open_modal();
            draft.category = category;
            draft.weight_or_quantity = tier;
            draft.base_price = price;
            let outcome = shell.submit_new_tier().await;
            crate::finish(outcome, "base price tier created")
        }
        PricingCommands::Delete { target, id } => {
            let outcome = match target {
                PricingTarget::Rule => shell.delete_rule(id).await,
                PricingTarget::Tier => shell.delete_tier(id).await,
            };
            crate::finish(outcome, "deleted")
        }
    }
}

pub(crate) async fn run_specials(
    shell: &mut AdminShell<TerminalNotifier>,
    command: SpecialCommands,
) -> anyhow::Result<()> {
    match command {
        SpecialCommands::List => {
            let specials = shell.specials();
            if specials.is_empty() {
                println!("no specials");
                return Ok(());
            }
            println!(
                "{:<6}{:<28}{:<22}{:<10}{:<8}ENDS",
                "ID", "NAME", "TYPE", "VALUE", "ACTIVE"
            );
            for s in &specials {
                println!(
                    "{:<6}{:<28}{:<22}{:<10}{:<8}{}",
                    s.id,
                    crate::truncate(&s.name, 25),
                    s.special_type.as_str(),
                    s.value.normalize().to_string(),
                    if s.is_active { "yes" } else { "no" },
                    fmt_date(s.valid_until)
                );
            }
            Ok(())
        }
        SpecialCommands::Toggle { id } => {
            let outcome = shell.toggle_special_active(id).await;
            crate::finish(outcome, "special status toggled")
        }
    }
}

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string())
}

fn print_rules(shell: &AdminShell<TerminalNotifier>) {
    let rules = shell.pricing_rules_by_priority();
    if rules.is_empty() {
        println!("no pricing rules");
        return;
    }
    println!(
        "{:<6}{:<28}{:<22}{:<10}{:<10}{:<6}WINDOW",
        "ID", "NAME", "TYPE", "VALUE", "CATEGORY", "PRIO"
    );
    for r in rules {
        println!(
            "{:<6}{:<28}{:<22}{:<10}{:<10}{:<6}{} .. {}",
            r.id,
            crate::truncate(&r.name, 25),
            r.rule_type.as_str(),
            r.value.normalize().to_string(),
            r.category.map_or("all", ProductCategory::as_str),
            r.priority,
            fmt_date(r.valid_from),
            fmt_date(r.valid_until)
        );
    }
}

fn print_tiers(shell: &AdminShell<TerminalNotifier>) {
    let groups = shell.base_pricing_by_category();
    if groups.iter().all(|(_, tiers)| tiers.is_empty()) {
        println!("no base price tiers");
        return;
    }
    for (category, tiers) in groups {
        if tiers.is_empty() {
            continue;
        }
        println!("{}", category.label());
        for t in &tiers {
            println!(
                "  {:<6}{:<12}{:<10}{}",
                t.id,
                t.weight_or_quantity,
                canopy_core::format_display_price(t.base_price),
                if t.is_active { "" } else { "(inactive)" }
            );
        }
    }
}
