use super::cli_main::prompt;
use crate::Networks::antimony_model::RawModel;
use crate::Networks::errors::NetworkError;
use crate::Networks::model_store::JsonModelStore;
use crate::Networks::pruner::{simplify_all_models, simplify_model};
use crate::Networks::reaction_counter::count_all_reactions;
use crate::Utils::load_from_file::{load_model_from_file, save_model_to_file};
use crate::settings::AnalysisConfig;
use prettytable::{Cell, Row, Table};

/// count all models of the store matching the configured criteria, print and export the table
pub fn count_menu(config: &AnalysisConfig) -> Result<(), NetworkError> {
    let mut store = JsonModelStore::open(&config.store_path)?;
    let batch = count_all_reactions(&mut store, &config.criteria, &config.syntax)?;
    batch.pretty_print();
    batch.write_counts_csv(&config.report_path)?;
    println!("Reaction counts written to {}", config.report_path);
    Ok(())
}

/// fuse and prune one model file, write the reduced model next to it
pub fn simplify_file_menu(config: &AnalysisConfig) -> Result<(), NetworkError> {
    let file_name = prompt("Model file: ")?;
    let text = load_model_from_file(&file_name)?;
    let mut oracle = config.oracle()?;
    let report = simplify_model(&RawModel::with_syntax(&text, config.syntax.clone()), &mut oracle)?;

    let mut table = Table::new();
    table.add_row(Row::new(vec![Cell::new("fused reactions"), Cell::new("removed reactions")]));
    let n = report.model.fused_reactions.len().max(report.removed.len());
    for i in 0..n {
        let fused = report.model.fused_reactions.get(i).map_or("", |s| s.as_str());
        let removed = report.removed.get(i).map_or("", |s| s.as_str());
        table.add_row(Row::new(vec![Cell::new(fused), Cell::new(removed)]));
    }
    table.printstd();

    let reduced = report.model.to_text();
    println!("{}", reduced);
    let output = format!("{}.reduced", file_name);
    save_model_to_file(&output, &reduced)?;
    println!(
        "{} reactions kept after {} oracle calls, model written to {}",
        report.model.reactions.len(),
        report.oracle_calls,
        output
    );
    Ok(())
}

/// fuse and prune every stored model matching the configured criteria
pub fn simplify_store_menu(config: &AnalysisConfig) -> Result<(), NetworkError> {
    let mut store = JsonModelStore::open(&config.store_path)?;
    let mut oracle = config.oracle()?;
    let summary = simplify_all_models(&mut store, &config.criteria, &config.syntax, &mut oracle)?;
    println!("{} models simplified", summary.simplified.len());
    for (id, e) in &summary.failed {
        println!("\x1b[31mmodel {} failed: {}\x1b[0m", id, e);
    }
    Ok(())
}
