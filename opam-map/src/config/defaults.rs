//! Default value functions for serde deserialization.

pub fn pix_per_meter() -> f64 {
    10.0
}

pub fn agent_radius() -> f64 {
    1.5
}

pub fn reference_scale() -> f64 {
    crate::environment::DEFAULT_REFERENCE_SCALE
}

pub fn map_extensions() -> Vec<String> {
    ["png", "pgm", "bmp"].iter().map(|s| s.to_string()).collect()
}

pub fn output_dir() -> String {
    "./output".to_string()
}

pub fn enabled() -> bool {
    true
}

pub fn time_step() -> f64 {
    1.0 / 60.0
}

pub fn neighbor_dist() -> f64 {
    1.5
}

pub fn max_neighbors() -> usize {
    5
}

pub fn time_horizon() -> f64 {
    1.5
}

pub fn time_horizon_obst() -> f64 {
    2.0
}

pub fn orca_radius() -> f64 {
    0.4
}

pub fn max_speed() -> f64 {
    2.0
}

pub fn num_agents() -> usize {
    5
}
