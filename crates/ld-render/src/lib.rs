//! layerdeck rendering support: layer geometry, hit testing, transform
//! handles and the display list handed to a [`SceneRenderer`].

pub mod geometry;
pub mod handles;
pub mod hit;
pub mod scene;

pub use geometry::{Frame, layer_bounds, layer_transform, node_origin, origin_from_node};
pub use handles::{Handle, handle_at, handle_points, resize_frame, rotate_frame};
pub use hit::{hit_test, hit_test_rect, layer_contains};
pub use scene::{
    DisplayList, DrawItem, Preview, SceneRenderer, SelectionOutline, build_display_list,
};
