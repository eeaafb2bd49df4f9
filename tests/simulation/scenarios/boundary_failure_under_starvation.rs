//! A starving pet in a storm: the boundary fails and vitals bleed.

use crate::simulation::helpers::{seeded_model, SEED};
use companion_dynamics::enums::Weather;

#[test]
fn starvation_in_a_storm_degrades_predictably() {
    let (mut model, ids) = seeded_model(SEED, 1);
    let pet_id = ids[0].clone();

    {
        let pet = model.pet_mut(&pet_id).unwrap();
        pet.energy_system_mut().set_energy(5.0);
        pet.vitals_mut().energy = 5.0;
        pet.energy_system_mut().boundary_mut().adjust_size(0.5, 2.0);
        // A worn-down pet: every need half unmet.
        let needs = pet.needs_mut();
        needs.hunger = 50.0;
        needs.thirst = 50.0;
        needs.social = 50.0;
        needs.play = 50.0;
        needs.rest = 50.0;
    }
    model.environment_mut().set_weather(Weather::Stormy);

    let start_permeability = model
        .pet(&pet_id)
        .unwrap()
        .energy_system()
        .boundary()
        .permeability();

    let mut failing_ticks = 0;
    for _ in 0..3 {
        let mood_before = model.pet(&pet_id).unwrap().vitals().mood;
        let health_before = model.pet(&pet_id).unwrap().vitals().health;

        let report = model.step();
        let agent = &report.agents[0];

        assert!(
            agent.boundary.permeability >= start_permeability,
            "permeability dipped below its starting value"
        );

        if agent.boundary_failing {
            failing_ticks += 1;
            let pet = model.pet(&pet_id).unwrap();
            assert!(
                mood_before - pet.vitals().mood >= 1.0,
                "failing tick dropped mood by less than 1"
            );
            assert!(
                health_before - pet.vitals().health >= 1.0,
                "failing tick dropped health by less than 1"
            );
        }
    }

    assert!(
        failing_ticks >= 2,
        "boundary failed on only {failing_ticks} of 3 ticks"
    );
}
