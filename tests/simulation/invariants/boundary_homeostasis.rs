//! Permeability homeostasis under plentiful energy.

use crate::simulation::helpers::{seeded_model, SEED};
use companion_dynamics::boundary::{MAX_PERMEABILITY, MIN_PERMEABILITY};

#[test]
fn permeability_settles_into_the_working_band() {
    for start in [MIN_PERMEABILITY, 0.5, MAX_PERMEABILITY] {
        let (mut model, ids) = seeded_model(SEED, 1);
        let pet_id = ids[0].clone();

        {
            let pet = model.pet_mut(&pet_id).unwrap();
            let boundary = pet.energy_system_mut().boundary_mut();
            let delta = start - boundary.permeability();
            boundary.adjust_permeability(delta, MIN_PERMEABILITY);
        }

        for _ in 0..200 {
            // Keep the tank topped up: homeostasis should come from the
            // boundary rules, not starvation.
            model
                .pet_mut(&pet_id)
                .unwrap()
                .energy_system_mut()
                .add_energy(100.0, "caretaker");
            model.step();
        }

        let permeability = model
            .pet(&pet_id)
            .unwrap()
            .energy_system()
            .boundary()
            .permeability();
        assert!(
            (0.2..=0.6).contains(&permeability),
            "from {start}, permeability settled at {permeability}"
        );
    }
}
