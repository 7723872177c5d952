//! # Quadra CLI Application
//!
//! Terminal front end for the switchboard sizing engine.
//!
//! ## Usage
//!
//! ```bash
//! calc_cli                  # interactive: pick a template or enter loads
//! calc_cli project.json     # design a saved project
//! RUST_LOG=calc_core=debug calc_cli project.json
//! ```
//!
//! Human-readable results go to stdout followed by the JSON report; logs go
//! to stderr.

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use calc_core::calculations::{design_switchboard, SwitchboardDesign};
use calc_core::catalog::BreakerCatalog;
use calc_core::loads::{Load, LoadTemplate, Regime};
use calc_core::project::{Environment, Project, ProtectionGrade, Sector};
use calc_core::report::DesignReport;
use calc_core::{CalcError, CalcResult};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn prompt_line(prompt: &str) -> Option<String> {
    print!("{}", prompt);
    io::stdout().flush().ok()?;

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input.trim().to_string()),
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    prompt_line(prompt)
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

fn prompt_choice(prompt: &str, options: &[&str], default: usize) -> usize {
    for (i, option) in options.iter().enumerate() {
        println!("  {}. {}", i + 1, option);
    }
    prompt_line(prompt)
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| (1..=options.len()).contains(n))
        .map(|n| n - 1)
        .unwrap_or(default)
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "calc_cli=info,calc_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    println!("Quadra CLI - Low-Voltage Switchboard Designer");
    println!("=============================================");
    println!();

    let project = match std::env::args().nth(1) {
        Some(path) => match load_project_file(&path) {
            Ok(project) => project,
            Err(e) => return report_error(&e),
        },
        None => interactive_project(),
    };

    match design_switchboard(&project, BreakerCatalog::standard()) {
        Ok(design) => {
            print_design(&project, &design);

            let report = DesignReport::build(&project, &design);
            println!();
            println!("JSON Output (for LLM/API use):");
            match report.to_json() {
                Ok(json) => println!("{}", json),
                Err(e) => return report_error(&e),
            }

            if design.is_acceptable() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(2)
            }
        }
        Err(e) => report_error(&e),
    }
}

fn load_project_file(path: &str) -> CalcResult<Project> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        CalcError::invalid_field("project_file", path, e.to_string())
    })?;
    let project = Project::from_json(&json)?;
    tracing::info!(path, loads = project.loads().len(), "project loaded");
    Ok(project)
}

fn interactive_project() -> Project {
    let name = prompt_line("Project name [Untitled]: ")
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    println!();
    println!("Sector:");
    let sector_names: Vec<&str> = Sector::ALL.iter().map(|s| s.display_name()).collect();
    let sector = Sector::ALL[prompt_choice("Choose sector [1]: ", &sector_names, 0)];

    println!();
    println!("Environment:");
    let env_names: Vec<&str> = Environment::ALL.iter().map(|e| e.display_name()).collect();
    let environment = Environment::ALL[prompt_choice("Choose environment [1]: ", &env_names, 0)];

    let mut project = Project::new(name, sector, environment);
    prompt_protection_grade(&mut project);
    project.settings.budget_keur = prompt_f64("Budget (k€) [100]: ", project.settings.budget_keur);

    println!();
    println!("Loads:");
    let mut sources: Vec<&str> = LoadTemplate::ALL.iter().map(|t| t.display_name()).collect();
    sources.push("Enter loads manually");
    let choice = prompt_choice("Choose load source [1]: ", &sources, 0);

    match LoadTemplate::ALL.get(choice) {
        Some(&template) => {
            if let Err(e) = project.load_template(template) {
                eprintln!("Error: {}", e);
            }
        }
        None => enter_loads(&mut project),
    }
    project
}

fn prompt_protection_grade(project: &mut Project) {
    let current = project.meta.protection_grade;
    let Some(input) = prompt_line(&format!("Protection grade [{}]: ", current)) else {
        return;
    };
    if input.is_empty() {
        return;
    }
    match ProtectionGrade::from_str_flexible(&input) {
        Ok(grade) => project.set_protection_grade(grade),
        Err(e) => println!("  Keeping {}: {}", current, e),
    }
}

fn enter_loads(project: &mut Project) {
    println!("Enter loads; leave the name empty to finish.");
    loop {
        let name = match prompt_line("  Name: ") {
            Some(name) if !name.is_empty() => name,
            _ => break,
        };
        let power_kw = prompt_f64("  Power (kW): ", 0.0);
        let power_factor = prompt_f64("  cos φ [0.85]: ", 0.85);
        let intermittent = prompt_line("  Intermittent? (y/N): ")
            .map(|s| s.eq_ignore_ascii_case("y"))
            .unwrap_or(false);
        let regime = if intermittent { Regime::Intermittent } else { Regime::Continuous };
        let default_hours = regime.default_hours();
        let hours = prompt_f64(&format!("  Hours per day [{}]: ", default_hours), default_hours);

        let load = Load::new(name, power_kw)
            .with_power_factor(power_factor)
            .with_regime(regime)
            .with_hours(hours);
        match project.add_load(load) {
            Ok(_) => println!("  Added ({} loads)", project.loads().len()),
            Err(e) => println!("  Rejected: {}", e),
        }
    }
}

fn print_design(project: &Project, design: &SwitchboardDesign) {
    println!();
    println!("═══════════════════════════════════════");
    println!("  SWITCHBOARD DESIGN: {}", project.meta.name);
    println!("═══════════════════════════════════════");
    println!();
    println!("Project:");
    println!("  Sector:      {}", project.meta.sector);
    println!("  Environment: {}", project.meta.environment);
    println!("  Protection:  {}", project.meta.protection_grade);
    println!();
    println!("Power Balance:");
    println!("  Installed:   {:.1} kW", design.sizing.installed_power_kw);
    println!("  Ks:          {:.3}", design.sizing.simultaneity_factor);
    println!("  Design:      {:.1} kW", design.sizing.design_power_kw);
    println!("  Main I:      {:.1} A", design.main_current_a);
    println!();
    println!("Supply:");
    println!("  Transformer: {:.0} kVA {}", design.transformer.rating_kva, design.transformer.vector_group);
    println!("  Icc:         {:.2} kA", design.fault_current_ka);
    println!();
    println!("Breakers:");
    for assignment in design.breakers.main.iter().chain(design.breakers.branches.iter()) {
        println!(
            "  {:<20} {:>7.1} A  {:<14} {:>8.0} €",
            assignment.circuit,
            assignment.required_current_a,
            assignment.breaker.label(),
            assignment.breaker.price_eur
        );
    }
    for unresolved in &design.breakers.unresolved {
        println!("  {:<20} {:>7.1} A  [UNRESOLVED] {}", unresolved.circuit, unresolved.required_current_a, unresolved.error);
    }
    println!("  Total:       {:.0} €", design.breakers.total_cost_eur);
    println!(
        "  Budget:      {:.1}% of {:.0} k€ {}",
        design.budget.breaker_share_pct,
        design.budget.budget_eur / 1000.0,
        status_icon(design.budget.within_breaker_share)
    );
    println!();
    println!("Switchboard:");
    println!("  Enclosure:   {} ({} feeders)", design.enclosure.enclosure, design.enclosure.feeders);
    println!("  Busbar:      {:.0} A", design.busbar_rating_a);
    println!(
        "  Thermal:     {:.0} W / {:.0} W, margin {:.1}% {}",
        design.thermal.dissipated_w,
        design.thermal.max_dissipable_w,
        design.thermal.margin_pct,
        design.thermal.verdict
    );
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {}",
        if design.is_acceptable() { "PASS" } else { "REVIEW REQUIRED" }
    );
    println!("═══════════════════════════════════════");
}

fn report_error(e: &CalcError) -> ExitCode {
    tracing::error!(code = e.error_code(), "design failed");
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
    ExitCode::FAILURE
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[OVER]" }
}
