//! The per-pet energy economy.

mod energy_system;

pub use energy_system::{
    EnergyAllocations, EnergyReport, EnergySystem, InsufficientEnergy, MAX_ENERGY,
};
