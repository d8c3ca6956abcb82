// Floating point comparisons
pub const FEQ_EPSILON: f64 = 0.0001;

// A ray this close to parallel with a plane is treated as a miss.
pub const PARALLEL_EPSILON: f64 = 1e-6;

// Offset along the surface normal for shadow and reflection ray origins.
pub const SURFACE_OFFSET: f64 = 1e-4;

// Progress is reported once every this many columns.
pub const PROGRESS_COLUMNS: usize = 10;

// Reference render parameters
pub const CANVAS_WIDTH: usize = 400;
pub const CANVAS_HEIGHT: usize = 300;
pub const REFLECTION_DEPTH: usize = 5;
pub const AMBIENT: f64 = 0.05;
pub const DIFFUSE_C: f64 = 1.0;
pub const SPECULAR_C: f64 = 1.0;
pub const SPECULAR_K: f64 = 50.0;
pub const SCREEN_SHIFT: f64 = 0.25;

// Checkerboard cells per unit length.
pub const CHECKER_FREQUENCY: f64 = 2.0;
pub const OUT_FILE: &str = "render.png";
