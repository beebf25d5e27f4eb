//! Fixed reference grids shared by every calculation.
//!
//! Each grid is built on first use and then shared read-only for the life of
//! the process. Both extrapolate linearly past their edges.

use std::sync::LazyLock;

use crate::interpolation::{Extrapolate, Table2D, TableError};

use super::CondenserError;

/// Cooling-water speed axis of the Metro-Vickers grid, m/s.
const MV_SPEEDS: [f64; 19] = [
    0.4, 0.6, 0.8, 1.0, 1.2, 1.4, 1.6, 1.8, 1.9, 2.0, 2.1, 2.2, 2.4, 2.6, 2.8, 3.0, 3.2, 3.4, 3.6,
];

/// Mean cooling-water temperature axis of the Metro-Vickers grid, °C.
const MV_TEMPERATURES: [f64; 9] = [5.0, 15.0, 27.0, 38.0, 50.0, 70.0, 95.0, 120.0, 150.0];

/// Base heat-transfer coefficients, one row per speed.
const MV_COEFFICIENTS: [[f64; 9]; 19] = [
    [800.0, 1050.0, 1260.0, 1430.0, 1540.0, 1670.0, 1770.0, 1870.0, 1930.0],
    [1260.0, 1510.0, 1720.0, 1890.0, 2000.0, 2170.0, 2270.0, 2370.0, 2430.0],
    [1670.0, 1920.0, 2130.0, 2300.0, 2430.0, 2600.0, 2700.0, 2800.0, 2860.0],
    [1970.0, 2220.0, 2450.0, 2620.0, 2750.0, 2950.0, 3060.0, 3160.0, 3230.0],
    [2200.0, 2450.0, 2680.0, 2850.0, 2990.0, 3190.0, 3290.0, 3390.0, 3490.0],
    [2410.0, 2680.0, 2900.0, 3080.0, 3210.0, 3400.0, 3520.0, 3620.0, 3700.0],
    [2590.0, 2840.0, 3070.0, 3230.0, 3380.0, 3570.0, 3690.0, 3790.0, 3880.0],
    [2760.0, 3010.0, 3230.0, 3420.0, 3550.0, 3730.0, 3850.0, 3960.0, 4040.0],
    [2830.0, 3080.0, 3300.0, 3490.0, 3630.0, 3810.0, 3930.0, 4040.0, 4120.0],
    [2900.0, 3150.0, 3370.0, 3570.0, 3700.0, 3870.0, 4000.0, 4110.0, 4190.0],
    [2980.0, 3230.0, 3440.0, 3640.0, 3770.0, 3950.0, 4070.0, 4180.0, 4250.0],
    [3040.0, 3290.0, 3500.0, 3690.0, 3830.0, 4000.0, 4120.0, 4220.0, 4310.0],
    [3150.0, 3400.0, 3620.0, 3810.0, 3940.0, 4120.0, 4230.0, 4350.0, 4420.0],
    [3250.0, 3500.0, 3710.0, 3910.0, 4040.0, 4220.0, 4330.0, 4440.0, 4540.0],
    [3340.0, 3590.0, 3800.0, 3990.0, 4130.0, 4320.0, 4420.0, 4530.0, 4610.0],
    [3440.0, 3690.0, 3870.0, 4050.0, 4180.0, 4390.0, 4500.0, 4600.0, 4670.0],
    [3500.0, 3750.0, 3930.0, 4100.0, 4230.0, 4460.0, 4560.0, 4660.0, 4730.0],
    [3560.0, 3810.0, 3990.0, 4160.0, 4290.0, 4520.0, 4620.0, 4720.0, 4790.0],
    [3600.0, 3850.0, 4040.0, 4200.0, 4340.0, 4560.0, 4660.0, 4760.0, 4840.0],
];

/// Reduced steam flow axis of the VKU grid, % of nominal.
const VKU_FLOWS: [f64; 11] = [
    20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0, 90.0, 100.0, 110.0, 120.0,
];

/// Ambient air temperature axis of the VKU grid, °C, hottest first.
const VKU_TEMPERATURES: [f64; 15] = [
    40.0, 35.0, 30.0, 25.0, 20.0, 15.0, 10.0, 5.0, 0.0, -5.0, -10.0, -15.0, -20.0, -25.0, -30.0,
];

/// Condenser pressure in kgf/cm², one row per reduced flow.
///
/// Each node is the IF97 saturation pressure at `t_air + ITD · G / 100`. The
/// initial temperature difference ITD is linear in air temperature and is
/// pinned by the two design points at 100 % flow: 0.097280927 at 30 °C and
/// 0.060673115 at 20 °C.
#[rustfmt::skip]
const VKU_PRESSURES: [[f64; 15]; 11] = [
    [0.084430468, 0.064939677, 0.049469473, 0.037304588, 0.027832457, 0.020533138, 0.014969444, 0.010777425, 0.007657272, 0.005364759, 0.003703269, 0.002516481, 0.001681749, 0.00110419, 0.000711491],
    [0.090294097, 0.069815462, 0.0534816, 0.040570461, 0.030461165, 0.022624397, 0.016612981, 0.012052744, 0.008633757, 0.006102039, 0.004251806, 0.002918311, 0.001971327, 0.001309291, 0.000854116],
    [0.096839347, 0.075284329, 0.058004947, 0.044272719, 0.03345862, 0.025023971, 0.018511472, 0.013536467, 0.009778536, 0.006973498, 0.004905893, 0.003401999, 0.002323444, 0.001561415, 0.001031507],
    [0.104065467, 0.081352034, 0.06305012, 0.048425349, 0.03684092, 0.027749001, 0.02068223, 0.015245396, 0.0111074, 0.007993569, 0.005678394, 0.003978751, 0.002747645, 0.001868523, 0.001250162],
    [0.111993449, 0.088042596, 0.068643007, 0.053055086, 0.040634771, 0.030825445, 0.023149892, 0.017202422, 0.012641199, 0.009180892, 0.006585677, 0.004662681, 0.00325589, 0.002240568, 0.001518213],
    [0.12065627, 0.095390404, 0.074818476, 0.058196456, 0.044873665, 0.034285181, 0.025944281, 0.019434984, 0.014404782, 0.010557616, 0.00764718, 0.005470588, 0.003862466, 0.002689507, 0.001845503],
    [0.130094968, 0.103437079, 0.081617915, 0.063889894, 0.04959646, 0.038164989, 0.029099697, 0.021974621, 0.016426738, 0.012149302, 0.008885433, 0.006422046, 0.004584136, 0.003229483, 0.002243784],
    [0.140356814, 0.112230046, 0.089088143, 0.070180939, 0.054846836, 0.042506202, 0.032654743, 0.024856917, 0.018739456, 0.013985045, 0.010326238, 0.007539636, 0.005440394, 0.00387709, 0.002726977],
    [0.151494401, 0.121821847, 0.097280927, 0.077119924, 0.060673115, 0.047354646, 0.036652357, 0.02812163, 0.021379304, 0.01609772, 0.011998946, 0.008849238, 0.006453769, 0.004651683, 0.003311484],
    [0.16356517, 0.132269818, 0.106252778, 0.084761883, 0.067128274, 0.052760739, 0.041139985, 0.031812908, 0.024386906, 0.01852428, 0.013936788, 0.010380382, 0.007650188, 0.005575742, 0.004016547],
    [0.176631184, 0.143635958, 0.116064918, 0.093166599, 0.074270057, 0.058779664, 0.046169805, 0.03597957, 0.027807451, 0.021306107, 0.016177244, 0.012166639, 0.009059372, 0.006675273, 0.004864645],
];

static METRO_VICKERS: LazyLock<Result<Table2D, TableError>> = LazyLock::new(|| {
    Table2D::with_extrapolate(
        &MV_SPEEDS,
        &MV_TEMPERATURES,
        &MV_COEFFICIENTS,
        Extrapolate::Enable,
    )
});

static VKU: LazyLock<Result<Table2D, TableError>> = LazyLock::new(|| {
    Table2D::with_extrapolate(
        &VKU_FLOWS,
        &VKU_TEMPERATURES,
        &VKU_PRESSURES,
        Extrapolate::Enable,
    )
});

/// Base heat-transfer coefficient by (water speed, mean water temperature).
pub(crate) fn metro_vickers_grid() -> Result<&'static Table2D, CondenserError> {
    loaded(&METRO_VICKERS)
}

/// Condenser pressure by (reduced flow %, air temperature).
pub(crate) fn vku_grid() -> Result<&'static Table2D, CondenserError> {
    loaded(&VKU)
}

fn loaded(
    grid: &'static LazyLock<Result<Table2D, TableError>>,
) -> Result<&'static Table2D, CondenserError> {
    LazyLock::force(grid)
        .as_ref()
        .map_err(|err| CondenserError::ReferenceGrid(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grids_load() {
        let mv = metro_vickers_grid().unwrap();
        assert_eq!(mv.x().len(), 19);
        assert_eq!(mv.y().len(), 9);

        let vku = vku_grid().unwrap();
        assert_eq!(vku.y()[0], -30.0);
        assert_eq!(vku.interpolate(100.0, 30.0).unwrap(), 0.097_280_927);
        assert_eq!(vku.interpolate(100.0, 20.0).unwrap(), 0.060_673_115);
    }

    #[test]
    fn grids_extrapolate() {
        let mv = metro_vickers_grid().unwrap();
        let edge = mv.interpolate(3.6, 160.0).unwrap();
        assert!(edge > 4840.0);
    }
}
