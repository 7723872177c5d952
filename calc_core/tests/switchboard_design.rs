//! End-to-end design runs on the built-in templates.

use calc_core::calculations::{design_switchboard, ThermalVerdict};
use calc_core::catalog::{BreakerCatalog, BreakerModel, EnclosureType};
use calc_core::loads::{Load, LoadTemplate, Priority};
use calc_core::project::{Environment, Project, ProtectionGrade, Sector};
use calc_core::report::DesignReport;
use calc_core::CalcError;

fn project_with(template: LoadTemplate, environment: Environment) -> Project {
    let mut project = Project::new(template.display_name(), Sector::Industrial, environment);
    project.load_template(template).unwrap();
    project
}

fn branch_labels(project: &Project) -> Vec<String> {
    let design = design_switchboard(project, BreakerCatalog::standard()).unwrap();
    design
        .breakers
        .branches
        .iter()
        .map(|a| a.breaker.label())
        .collect()
}

#[test]
fn mechanical_workshop() {
    let project = project_with(LoadTemplate::MechanicalWorkshop, Environment::IndoorNormal);
    let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();

    assert_eq!(design.sizing.installed_power_kw, 132.0);
    assert_eq!(design.sizing.simultaneity_factor, 0.9);
    assert!((design.sizing.design_power_kw - 136.62).abs() < 1e-9);

    assert_eq!(design.transformer.rating_kva, 160.0);
    assert!((design.fault_current_ka - 3.849).abs() < 0.001);
    assert!((design.main_current_a - 232.0).abs() < 0.01);

    let main = design.breakers.main.as_ref().unwrap();
    assert_eq!(main.breaker.label(), "T5H400 320A");
    assert_eq!(
        branch_labels(&project),
        vec!["T2S160 100A", "T1S160 80A", "T1S160 63A", "T1S160 63A", "T1S160 63A"]
    );
    assert_eq!(design.breakers.total_cost_eur, 4750.0);
    assert!(design.breakers.unresolved.is_empty());

    assert_eq!(design.busbar_rating_a, 245.0);
    assert_eq!(design.enclosure.enclosure, EnclosureType::ArtuMSingleColumn);
    assert_eq!(design.enclosure.feeders, 6);

    assert_eq!(design.thermal.dissipated_w, 155.0);
    assert_eq!(design.thermal.max_dissipable_w, 320.0);
    assert!((design.thermal.margin_pct - 51.5625).abs() < 1e-9);
    assert_eq!(design.thermal.verdict, ThermalVerdict::Ok);

    assert!(design.budget.within_breaker_share);
    assert!((design.budget.breaker_share_pct - 4.75).abs() < 1e-9);
    assert!(design.is_acceptable());
}

#[test]
fn dairy() {
    let project = project_with(LoadTemplate::Dairy, Environment::IndoorHumid);
    let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();

    assert_eq!(design.sizing.installed_power_kw, 315.0);
    assert!((design.sizing.simultaneity_factor - 0.80357).abs() < 1e-5);
    assert!((design.sizing.design_power_kw - 291.094).abs() < 0.001);

    assert_eq!(design.transformer.rating_kva, 315.0);
    assert!((design.fault_current_ka - 7.578).abs() < 0.001);
    assert!((design.main_current_a - 494.32).abs() < 0.01);

    assert_eq!(design.breakers.main.as_ref().unwrap().breaker.label(), "E1N800 630A");
    assert_eq!(
        branch_labels(&project),
        vec!["T4S250 250A", "T3S250 200A", "T3S250 200A", "T1S160 80A"]
    );
    assert_eq!(design.breakers.total_cost_eur, 8670.0);

    // 5 feeders but the main current exceeds 400 A
    assert_eq!(design.enclosure.enclosure, EnclosureType::ArtuKSingleColumn);
    assert_eq!(design.enclosure.price_eur, 12_000.0);
    assert_eq!(design.busbar_rating_a, 523.0);

    // IP43 sheds 288 W
    assert_eq!(design.thermal.dissipated_w, 140.0);
    assert!((design.thermal.max_dissipable_w - 288.0).abs() < 1e-9);
    assert_eq!(design.thermal.verdict, ThermalVerdict::Ok);
}

#[test]
fn protection_grade_override_changes_thermal_capacity() {
    let mut project = project_with(LoadTemplate::MechanicalWorkshop, Environment::IndoorNormal);
    project.set_protection_grade(ProtectionGrade::IP65);
    project.settings.enclosure_volume_m3 = 0.5;

    // 0.5 × 400 × 0.75 = 150 W < 155 W dissipated
    let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
    assert_eq!(design.thermal.max_dissipable_w, 150.0);
    assert_eq!(design.thermal.verdict, ThermalVerdict::NotOk);
    assert!(!design.is_acceptable());
}

#[test]
fn custom_catalog_leaves_unresolved_branches() {
    let catalog = BreakerCatalog::new(vec![
        BreakerModel::new("M", "M100", 100.0, 10.0, 300.0),
        BreakerModel::new("M", "M400", 400.0, 10.0, 900.0),
    ])
    .unwrap();

    let mut project = Project::default();
    project.add_load(Load::new("Pump", 30.0)).unwrap();
    // 250 kW draws 424.5 A, needing 530.7 A after derating
    project
        .add_load(Load::new("Kiln", 250.0).with_priority(Priority::Critical))
        .unwrap();

    // Design 289.8 kW: main current 492 A, unresolvable as well
    let design = design_switchboard(&project, &catalog).unwrap();
    let unresolved: Vec<&str> = design.breakers.unresolved.iter().map(|u| u.circuit.as_str()).collect();
    assert_eq!(unresolved, vec!["Main incomer", "Kiln"]);

    // Only the pump breaker is costed
    assert_eq!(design.breakers.branches.len(), 1);
    assert_eq!(design.breakers.total_cost_eur, 300.0);
    assert!(!design.is_acceptable());

    match &design.breakers.unresolved[1].error {
        CalcError::NoSuitableComponent { min_rated_current_a, .. } => {
            assert!((min_rated_current_a - 530.7).abs() < 0.1);
        }
        other => panic!("Expected NoSuitableComponent, got {:?}", other),
    }
}

#[test]
fn project_file_roundtrip_gives_same_design() {
    let project = project_with(LoadTemplate::Dairy, Environment::Outdoor);
    let reloaded = Project::from_json(&project.to_json().unwrap()).unwrap();

    let a = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
    let b = design_switchboard(&reloaded, BreakerCatalog::standard()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn load_lifecycle_restores_state() {
    let mut project = project_with(LoadTemplate::MechanicalWorkshop, Environment::IndoorNormal);
    let before = project.loads().clone();

    project.add_load(Load::new("Welder", 12.0)).unwrap();
    assert!(project.add_load(Load::new("welder", 3.0)).is_err());
    project.remove_load("Welder").unwrap();
    assert_eq!(project.loads(), &before);

    // Loading the same template again collides on every name and adds nothing
    assert!(project.load_template(LoadTemplate::MechanicalWorkshop).is_err());
    assert_eq!(project.loads(), &before);

    project.clear_loads();
    assert_eq!(
        design_switchboard(&project, BreakerCatalog::standard()).unwrap_err(),
        CalcError::EmptyLoadSet
    );
}

#[test]
fn report_matches_design() {
    let project = project_with(LoadTemplate::Dairy, Environment::IndoorHumid);
    let design = design_switchboard(&project, BreakerCatalog::standard()).unwrap();
    let report = DesignReport::build(&project, &design);

    assert_eq!(report.general.protection_grade, ProtectionGrade::IP43);
    assert_eq!(report.transformer.rating_kva, 315.0);
    assert_eq!(report.features.enclosure, "ArTu K - 1 column");
    assert_eq!(report.features.main_breaker.as_deref(), Some("E1N800 630A"));
    assert_eq!(report.loads.total_power_kw, 315.0);
    assert_eq!(report.loads.rows[2].name, "Centrifuge");
    assert_eq!(report.loads.rows[2].current_a, 135.3);
}
