//! Tabulated diverging colormaps (two-hue progression with center).
//!
//! Matplotlib diverging maps that have no `colorgrad` preset, stored as
//! evenly spaced RGB tables.

use super::colormap::{sample_table, Colormap, Rgba};

/// Blue to white to red, good for temperature anomalies
const COOLWARM: [[u8; 3]; 32] = [
    [59, 76, 192], // Dark blue
    [68, 90, 204],
    [77, 104, 215],
    [87, 117, 225],
    [98, 130, 234],
    [108, 142, 241],
    [119, 154, 247],
    [130, 165, 251],
    [141, 176, 254],
    [152, 185, 255],
    [163, 194, 255],
    [174, 201, 253],
    [184, 208, 249],
    [194, 213, 244],
    [204, 217, 238],
    [213, 219, 230],
    [221, 221, 221], // White/gray in the middle
    [229, 216, 209],
    [236, 211, 197],
    [241, 204, 185],
    [245, 196, 173],
    [247, 187, 160],
    [247, 177, 148],
    [247, 166, 135],
    [244, 154, 123],
    [241, 141, 111],
    [236, 127, 99],
    [229, 112, 88],
    [222, 96, 77],
    [213, 80, 66],
    [203, 62, 56],
    [192, 40, 47], // Dark red
];

/// Dark blue to white to dark red
const SEISMIC: [[u8; 3]; 15] = [
    [0, 0, 76], // Dark blue
    [0, 0, 128],
    [0, 0, 178],
    [0, 0, 229],
    [36, 36, 255],
    [109, 109, 255],
    [182, 182, 255],
    [255, 255, 255], // White in the middle
    [255, 182, 182],
    [255, 109, 109],
    [255, 36, 36],
    [237, 0, 0],
    [200, 0, 0],
    [164, 0, 0],
    [128, 0, 0], // Dark red
];

/// Coolwarm colormap - blue to red through white
pub struct Coolwarm;

impl Colormap for Coolwarm {
    fn map_normalized(&self, value: f64) -> Rgba {
        sample_table(&COOLWARM, value)
    }

    fn name(&self) -> &str {
        "coolwarm"
    }
}

/// Seismic colormap - blue-white-red for anomalies
pub struct Seismic;

impl Colormap for Seismic {
    fn map_normalized(&self, value: f64) -> Rgba {
        sample_table(&SEISMIC, value)
    }

    fn name(&self) -> &str {
        "seismic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colormap_names() {
        assert_eq!(Coolwarm.name(), "coolwarm");
        assert_eq!(Seismic.name(), "seismic");
    }

    #[test]
    fn test_coolwarm_bounds() {
        let colormap = Coolwarm;

        let blue = colormap.map_normalized(0.0);
        let red = colormap.map_normalized(1.0);

        assert!(blue[2] > blue[0]);
        assert!(red[0] > red[2]);

        // Middle should be close to white/light gray
        let middle = colormap.map_normalized(0.5);
        assert!(middle[0] > 200);
        assert!(middle[1] > 200);
        assert!(middle[2] > 200);
    }

    #[test]
    fn test_seismic_middle() {
        assert_eq!(Seismic.map_normalized(0.5), [255, 255, 255, 255]);
    }
}
