/// Optional JSON manifest overriding the built-in layer list.
pub const MANIFEST_PATH: &str = "dashboard.json";

/// Static map model, relative to the asset root.
pub const MODEL_PATH: &str = "models/map.glb";

/// Panel label for the map model toggle.
pub const MODEL_LABEL: &str = "GLTF Model";

/// Survey chart exports, loaded in this order.
pub const POINT_CLOUD_PATHS: &[&str] = &[
    "csv/P1_S2_CHART.csv",
    "csv/P1_S4_CHART.csv",
    "csv/P2_S1A_CHART.csv",
    "csv/P2_S2_CHART.csv",
    "csv/P2_S3_CHART.csv",
    "csv/P2_S4_CHART.csv",
    "csv/P3_S1A_CHART.csv",
    "csv/P3_S2_CHART.csv",
    "csv/P3_S3_CHART.csv",
    "csv/P3_S4_CHART.csv",
];

/// Canvas the web build renders into.
pub const CANVAS_SELECTOR: &str = "canvas.dashboard";
