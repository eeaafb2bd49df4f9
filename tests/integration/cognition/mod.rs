pub mod development_through_agent;
