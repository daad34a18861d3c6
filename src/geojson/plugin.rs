use bevy::prelude::*;

use super::{
    OutlineGizmos, advance_geo_containers, apply_outline_width, draw_geo_containers,
    read_dataset_receiver, request_datasets,
};

/// Loads the configured datasets and keeps their outlines animated.
pub struct GeoJsonPlugin;

impl Plugin for GeoJsonPlugin {
    fn build(&self, app: &mut App) {
        app.init_gizmo_group::<OutlineGizmos>()
            .add_systems(Startup, request_datasets)
            .add_systems(Update, read_dataset_receiver)
            .add_systems(
                Update,
                (advance_geo_containers, apply_outline_width, draw_geo_containers).chain(),
            );
    }
}
