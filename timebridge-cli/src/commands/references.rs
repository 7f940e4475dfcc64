//! `timebridge references`: show which Runn entities carry a Toggl reference.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use serde::Serialize;
use tabled::{settings::Style, Table, Tabled};

use timebridge_core::{EntityId, Referenced};

use crate::config::{HttpArgs, RunnArgs};

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directory {
    People,
    Projects,
}

/// Arguments for `timebridge references`.
#[derive(Args, Debug)]
pub struct ReferencesArgs {
    /// Which Runn directory to list.
    #[arg(value_enum, default_value_t = Directory::People)]
    pub directory: Directory,

    /// Emit machine-readable JSON.
    #[arg(long)]
    pub json: bool,

    #[command(flatten)]
    pub runn: RunnArgs,

    #[command(flatten)]
    pub http: HttpArgs,
}

#[derive(Debug, Serialize)]
struct ReferenceRow {
    id: String,
    name: String,
    external_id: Option<String>,
}

#[derive(Tabled)]
struct ReferenceTableRow {
    #[tabled(rename = "id")]
    id: String,
    #[tabled(rename = "name")]
    name: String,
    #[tabled(rename = "external id")]
    external_id: String,
}

impl ReferencesArgs {
    pub async fn run(self) -> Result<()> {
        let runn = self.runn.client(&self.http).context("invalid Runn settings")?;
        let key = self.runn.reference_key.as_str();

        let rows = match self.directory {
            Directory::People => {
                let people = runn.people().await.context("failed to fetch Runn people")?;
                people
                    .iter()
                    .map(|p| row(&p.id, &p.name, p, key))
                    .collect::<Vec<_>>()
            }
            Directory::Projects => {
                let projects = runn
                    .projects()
                    .await
                    .context("failed to fetch Runn projects")?;
                projects
                    .iter()
                    .map(|p| row(&p.id, &p.name, p, key))
                    .collect::<Vec<_>>()
            }
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&rows).context("failed to serialize references")?
            );
            return Ok(());
        }

        print_table(&rows, key);
        Ok(())
    }
}

fn row(id: &EntityId, name: &str, entity: &impl Referenced, key: &str) -> ReferenceRow {
    ReferenceRow {
        id: id.to_string(),
        name: name.to_owned(),
        external_id: entity.external_id(key).map(str::to_owned),
    }
}

fn print_table(rows: &[ReferenceRow], key: &str) {
    if rows.is_empty() {
        println!("Runn returned no entries.");
        return;
    }

    let unlinked = rows.iter().filter(|r| r.external_id.is_none()).count();
    let table_rows: Vec<ReferenceTableRow> = rows
        .iter()
        .map(|r| ReferenceTableRow {
            id: r.id.clone(),
            name: r.name.clone(),
            external_id: r.external_id.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    let mut table = Table::new(table_rows);
    table.with(Style::rounded());
    println!("{table}");

    if unlinked > 0 {
        println!(
            "{} {unlinked} of {} entries have no '{key}' reference and will never match",
            "■".yellow().bold(),
            rows.len()
        );
    } else {
        println!("{} every entry has a '{key}' reference", "■".green().bold());
    }
}
