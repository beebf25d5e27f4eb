//! Request fixtures shared by the end-to-end tests.

use serde_json::{Value, json};

/// A single-bundle Berman sweep over two temperatures and two steam flows.
#[must_use]
pub fn berman_parameters() -> Value {
    json!({
        "length_cooling_tubes_of_the_main_bundle": 7.08,
        "number_cooling_water_passes_of_the_main_bundle": 2,
        "number_cooling_tubes_of_the_main_bundle": 1754,
        "mass_flow_steam_nom": 16.0,
        "thermal_conductivity_cooling_surface_tube_material": 37.0,
        "diameter_inside_of_pipes": 22.0,
        "thickness_pipe_wall": 1.0,
        "enthalpy_flow_path_1": 520.0,
        "BAP": 1,
        "mass_flow_cooling_water_list": [1200],
        "temperature_cooling_water_1_list": [10, 20],
        "mass_flow_steam_list": [16, 8],
        "coefficient_R_list": [0.1e-6],
        "mass_flow_air": 16.5,
    })
}

/// A Metro-Vickers operating point with the inputs nested under `inputs`.
#[must_use]
pub fn metro_vickers_parameters() -> Value {
    json!({
        "diameter_inside_of_pipes": 22.4,
        "thickness_pipe_wall": 0.8,
        "length_cooling_tubes_of_the_main_bundle": 13910,
        "number_cooling_water_passes_of_the_main_bundle": 2,
        "number_cooling_tubes_of_the_main_bundle": 20904,
        "number_cooling_tubes_of_the_built_in_bundle": 0,
        "thermal_conductivity_cooling_surface_tube_material": 16.2,
        "inputs": {
            "mass_flow_cooling_water": 45000.0,
            "temperature_cooling_water_1": 45.0,
            "mass_flow_flow_path_1": 200.0,
            "degree_dryness_flow_path_1": 0.95,
        },
    })
}

/// A VKU unit run at its design point on a 30 °C day.
#[must_use]
pub fn vku_parameters() -> Value {
    json!({
        "mass_flow_flow_path_1": 1250.0,
        "degree_dryness_flow_path_1": 0.92,
        "mass_flow_steam_nom": 1250.0,
        "degree_dryness_steam_nom": 0.92,
        "temperature_air": 30.0,
    })
}

/// Manufacturer tables with NAMET wrapped in a `data` object.
#[must_use]
pub fn table_pressure_parameters(temperature: f64, steam_flow: f64) -> Value {
    json!({
        "NAMET": {
            "data": [
                [35, 33, 30, 25],
                [20, 50, 100, 150, 200],
                [
                    [6.549, 7.211, 8.88, 10.945, 13.409],
                    [5.9, 6.499, 8.018, 9.927, 12.214],
                    [5.036, 5.552, 6.872, 8.572, 10.622],
                    [3.851, 4.257, 5.299, 6.712, 8.438],
                ],
            ],
        },
        "NAMED": [
            [15.3, 26.8, 38.4, 49.9, 61.5, 73],
            [0.157, 0.258, 0.469, 0.607, 0.763, 0.919],
        ],
        "inputs": {
            "temperature_cooling_water_1": temperature,
            "mass_flow_flow_path_1": steam_flow,
        },
    })
}

/// Wraps parameters in a request envelope.
#[must_use]
pub fn request(strategy: &str, parameters: Value) -> Value {
    json!({
        "calculation_strategy": strategy,
        "parameters": parameters,
    })
}
