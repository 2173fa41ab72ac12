/// Drag coefficient lookup against the G1 and G7 reference tables
use once_cell::sync::Lazy;

use crate::DragModel;

/// Drag table data structure
#[derive(Debug, Clone)]
pub struct DragTable {
    pub mach_values: Vec<f64>,
    pub cd_values: Vec<f64>,
}

impl DragTable {
    /// Create a new drag table from mach and cd arrays
    ///
    /// Mach values must be strictly increasing.
    pub fn new(mach_values: Vec<f64>, cd_values: Vec<f64>) -> Self {
        debug_assert_eq!(mach_values.len(), cd_values.len());
        debug_assert!(mach_values.windows(2).all(|w| w[0] < w[1]));
        Self { mach_values, cd_values }
    }

    /// Build a table from (Mach, Cd) pairs
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Self {
        let mach_values = pairs.iter().map(|(m, _)| *m).collect();
        let cd_values = pairs.iter().map(|(_, cd)| *cd).collect();
        Self::new(mach_values, cd_values)
    }

    /// Linearly interpolate the drag coefficient for a Mach number.
    ///
    /// Outside the table the boundary value is returned; there is no
    /// extrapolation.
    pub fn interpolate(&self, mach: f64) -> f64 {
        let n = self.mach_values.len();
        if n == 0 {
            return 0.0;
        }

        if mach <= self.mach_values[0] {
            return self.cd_values[0];
        }
        if mach >= self.mach_values[n - 1] {
            return self.cd_values[n - 1];
        }

        // First bracketing pair by ascending scan
        for i in 0..n - 1 {
            if self.mach_values[i] <= mach && mach <= self.mach_values[i + 1] {
                return self.linear_interpolate(mach, i);
            }
        }

        // Only reachable for NaN
        self.cd_values[n - 1]
    }

    /// Linear interpolation between two points
    pub fn linear_interpolate(&self, mach: f64, idx: usize) -> f64 {
        let x0 = self.mach_values[idx];
        let x1 = self.mach_values[idx + 1];
        let y0 = self.cd_values[idx];
        let y1 = self.cd_values[idx + 1];

        let t = (mach - x0) / (x1 - x0);
        y0 + t * (y1 - y0)
    }

    pub fn len(&self) -> usize {
        self.mach_values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mach_values.is_empty()
    }
}

const G1_TABLE_DATA: [(f64, f64); 50] = [
    (0.00, 0.2629), (0.50, 0.2558), (0.60, 0.2487), (0.70, 0.2413),
    (0.80, 0.2344), (0.85, 0.2349), (0.875, 0.2402), (0.90, 0.2512),
    (0.925, 0.2788), (0.95, 0.3142), (0.975, 0.3462), (1.00, 0.3734),
    (1.025, 0.3949), (1.05, 0.4084), (1.075, 0.4154), (1.10, 0.4177),
    (1.125, 0.4166), (1.15, 0.4133), (1.20, 0.4023), (1.25, 0.3887),
    (1.30, 0.3741), (1.35, 0.3594), (1.40, 0.3451), (1.45, 0.3314),
    (1.50, 0.3186), (1.55, 0.3068), (1.60, 0.2960), (1.65, 0.2862),
    (1.70, 0.2774), (1.75, 0.2694), (1.80, 0.2621), (1.85, 0.2555),
    (1.90, 0.2495), (1.95, 0.2440), (2.00, 0.2388), (2.05, 0.2340),
    (2.10, 0.2296), (2.15, 0.2254), (2.20, 0.2215), (2.25, 0.2179),
    (2.30, 0.2144), (2.35, 0.2111), (2.40, 0.2080), (2.45, 0.2051),
    (2.50, 0.2023), (2.60, 0.1972), (2.70, 0.1926), (2.80, 0.1884),
    (2.90, 0.1846), (3.00, 0.1812),
];

const G7_TABLE_DATA: [(f64, f64); 50] = [
    (0.00, 0.1198), (0.50, 0.1197), (0.60, 0.1196), (0.70, 0.1194),
    (0.80, 0.1193), (0.85, 0.1194), (0.875, 0.1210), (0.90, 0.1256),
    (0.925, 0.1382), (0.95, 0.1618), (0.975, 0.1903), (1.00, 0.2124),
    (1.025, 0.2278), (1.05, 0.2378), (1.075, 0.2436), (1.10, 0.2464),
    (1.125, 0.2470), (1.15, 0.2460), (1.20, 0.2405), (1.25, 0.2318),
    (1.30, 0.2218), (1.35, 0.2115), (1.40, 0.2015), (1.45, 0.1920),
    (1.50, 0.1832), (1.55, 0.1750), (1.60, 0.1676), (1.65, 0.1608),
    (1.70, 0.1547), (1.75, 0.1491), (1.80, 0.1440), (1.85, 0.1393),
    (1.90, 0.1350), (1.95, 0.1310), (2.00, 0.1273), (2.05, 0.1239),
    (2.10, 0.1207), (2.15, 0.1178), (2.20, 0.1150), (2.25, 0.1125),
    (2.30, 0.1101), (2.35, 0.1078), (2.40, 0.1058), (2.45, 0.1038),
    (2.50, 0.1020), (2.60, 0.0987), (2.70, 0.0957), (2.80, 0.0929),
    (2.90, 0.0904), (3.00, 0.0880),
];

/// G1 drag table with lazy loading
static G1_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| DragTable::from_pairs(&G1_TABLE_DATA));

/// G7 drag table with lazy loading
static G7_DRAG_TABLE: Lazy<DragTable> = Lazy::new(|| DragTable::from_pairs(&G7_TABLE_DATA));

/// Reference table for a drag model
pub fn drag_table(drag_model: DragModel) -> &'static DragTable {
    match drag_model {
        DragModel::G1 => &*G1_DRAG_TABLE,
        DragModel::G7 => &*G7_DRAG_TABLE,
    }
}

/// Get drag coefficient for given Mach number and drag model
pub fn get_drag_coefficient(mach: f64, drag_model: DragModel) -> f64 {
    drag_table(drag_model).interpolate(mach)
}
