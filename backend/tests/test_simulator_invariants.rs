//! Invariants that hold for every trial of every valid configuration

use admission_simulator_core_rs::{
    simulate, Counter, RngManager, SimulationConfig, Simulator, TrialOutcome,
};
use proptest::prelude::*;

#[test]
fn test_zero_capacity_gives_all_zero_trials() {
    let config = SimulationConfig {
        capacity: 0,
        trial_count: 250,
        ..SimulationConfig::default()
    };

    let result = simulate(config).unwrap();

    assert_eq!(result.len(), 250);
    for counter in Counter::ALL {
        let series = result.series(counter);
        assert_eq!(series.len(), 250);
        assert!(series.iter().all(|&v| v == 0), "{} not all zero", counter);
    }
}

#[test]
fn test_result_has_one_outcome_per_trial() {
    let config = SimulationConfig {
        capacity: 10,
        trial_count: 37,
        ..SimulationConfig::default()
    };
    assert_eq!(simulate(config).unwrap().len(), 37);
}

#[test]
fn test_no_testing_means_no_rejections() {
    let config = SimulationConfig {
        capacity: 300,
        trial_count: 50,
        ..SimulationConfig::default()
    }
    .with_testing(false, false);

    let result = simulate(config).unwrap();

    assert!(result.iter().all(|t| t.rejected.total() == 0));
    assert!(result.iter().all(|t| t.candidates_drawn() == 300));
}

#[test]
fn test_3g_never_rejects_vaccinated() {
    let config = SimulationConfig {
        capacity: 300,
        trial_count: 50,
        ..SimulationConfig::default()
    }
    .with_testing(false, true);

    let result = simulate(config).unwrap();

    assert!(result.iter().all(|t| t.rejected.vaccinated() == 0));
}

#[test]
fn test_full_vaccination_admits_only_vaccinated() {
    let config = SimulationConfig {
        vaccination_rate: 1.0,
        capacity: 150,
        trial_count: 40,
        ..SimulationConfig::default()
    };

    let result = simulate(config).unwrap();

    assert!(result
        .series(Counter::AdmittedVaccinated)
        .iter()
        .all(|&v| v == 150));
    assert!(result
        .series(Counter::AdmittedUnvaccinated)
        .iter()
        .all(|&v| v == 0));
}

#[test]
fn test_perfect_specificity_never_rejects_uninfected() {
    let config = SimulationConfig {
        test_specificity: 1.0,
        prevalence: 0.2,
        capacity: 200,
        trial_count: 50,
        ..SimulationConfig::default()
    }
    .with_testing(true, true);

    let result = simulate(config).unwrap();

    assert!(result.rejected_uninfected().iter().all(|&v| v == 0));
    assert!(result.rejected_infected().iter().any(|&v| v > 0));
}

#[test]
fn test_perfect_test_admits_no_infected() {
    let config = SimulationConfig {
        test_sensitivity: 1.0,
        test_specificity: 1.0,
        prevalence: 0.1,
        capacity: 200,
        trial_count: 200,
        ..SimulationConfig::default()
    }
    .with_testing(true, true);

    let result = simulate(config).unwrap();

    assert!(result.admitted_infected().iter().all(|&v| v == 0));
    assert!(result.rejected_uninfected().iter().all(|&v| v == 0));
}

#[test]
fn test_everyone_infected_everyone_admitted_untested() {
    let config = SimulationConfig {
        prevalence: 1.0,
        vaccine_efficacy: 0.0,
        capacity: 25,
        trial_count: 10,
        ..SimulationConfig::default()
    }
    .with_testing(false, false);

    let result = simulate(config).unwrap();

    assert!(result.admitted_infected().iter().all(|&v| v == 25));
}

fn check_outcome(outcome: &TrialOutcome, capacity: u32) -> Result<(), TestCaseError> {
    prop_assert_eq!(outcome.admitted.total(), capacity);
    prop_assert_eq!(
        outcome.admitted_infected() + outcome.admitted_uninfected(),
        capacity
    );
    prop_assert_eq!(
        outcome.admitted.vaccinated() + outcome.admitted.unvaccinated(),
        capacity
    );
    prop_assert!(outcome.admitted_infected() <= capacity);
    prop_assert_eq!(
        outcome.candidates_drawn(),
        capacity + outcome.rejected_infected() + outcome.rejected_uninfected()
    );
    Ok(())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_every_trial_fills_exactly(
        vaccination_rate in 0.0f64..=1.0,
        vaccine_efficacy in -1.0f64..=1.0,
        prevalence in 0.0f64..=0.5,
        test_sensitivity in 0.0f64..=0.95,
        test_specificity in 0.05f64..=1.0,
        test_vaccinated in any::<bool>(),
        test_unvaccinated in any::<bool>(),
        capacity in 0u32..60,
        seed in any::<u64>(),
    ) {
        let config = SimulationConfig {
            vaccination_rate,
            vaccine_efficacy,
            prevalence,
            test_sensitivity,
            test_specificity,
            test_vaccinated,
            test_unvaccinated,
            capacity,
            trial_count: 4,
            rng_seed: seed,
        };
        let simulator = Simulator::new(config).unwrap();

        for outcome in simulator.run().iter() {
            check_outcome(outcome, capacity)?;
            if !test_vaccinated {
                prop_assert_eq!(outcome.rejected.vaccinated(), 0);
            }
            if !test_unvaccinated {
                prop_assert_eq!(outcome.rejected.unvaccinated(), 0);
            }
        }
    }

    #[test]
    fn prop_single_trial_deterministic(seed in any::<u64>()) {
        let config = SimulationConfig {
            capacity: 40,
            trial_count: 1,
            ..SimulationConfig::default()
        };
        let simulator = Simulator::new(config).unwrap();

        let a = simulator.run_trial(&mut RngManager::new(seed));
        let b = simulator.run_trial(&mut RngManager::new(seed));
        prop_assert_eq!(a, b);
    }
}
