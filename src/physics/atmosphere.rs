use crate::dynamics::state::G0;

// ---------------------------------------------------------------------------
// Barometric troposphere model (single lapse-rate layer)
// ---------------------------------------------------------------------------

const P0: f64 = 101_325.0;        // sea-level pressure, Pa
const AIR_MOLAR: f64 = 0.028_965_4; // molar mass of dry air, kg/mol
const GAS_CONSTANT: f64 = 8.314_463; // ideal gas constant, J/(mol·K)
const T0: f64 = 288.15;           // sea-level temperature, K
const LAPSE: f64 = 0.0065;        // temperature lapse rate, K/m

/// Density used for the first sample of every run, kg/m^3.
pub const SEA_LEVEL_DENSITY: f64 = 1.225;

/// Air density at a given altitude, kg/m^3.
///
/// rho = p0·M/(R·T0) · (1 - L·h/T0)^(g·M/(R·L) - 1)
///
/// Negative altitudes extrapolate the same curve. Above the point where the
/// linear temperature profile reaches 0 K (~44.3 km) the density is zero.
pub fn density(altitude_m: f64) -> f64 {
    let scale = P0 * AIR_MOLAR / (GAS_CONSTANT * T0);
    let exponent = G0 * AIR_MOLAR / (GAS_CONSTANT * LAPSE) - 1.0;
    let base = 1.0 - LAPSE * altitude_m / T0;
    if base <= 0.0 {
        return 0.0;
    }
    scale * base.powf(exponent)
}
