//! First-person viewmodel rendering.
//!
//! The body mesh and anything attached to its grip point render on a separate
//! layer, drawn by the viewmodel camera on top of the world. Dropped items
//! must go back to the world layer.

use bevy::prelude::*;
use bevy::render::view::RenderLayers;

use crate::player::BodyMesh;

/// Layer drawn by the main camera.
pub const WORLD_LAYER: usize = 0;
/// Layer drawn by the viewmodel camera.
pub const VIEWMODEL_LAYER: usize = 1;

/// Marks a detached item whose hierarchy should return to the world layer.
#[derive(Component)]
pub struct ReturnToWorldLayer;

/// Propagate the viewmodel layer to all descendants of the body mesh.
///
/// When a glTF scene loads, or an item is attached, the new child entities
/// don't inherit RenderLayers. This system adds the viewmodel layer to all of
/// them so they render on the viewmodel camera.
pub fn propagate_viewmodel_render_layers(
    mut commands: Commands,
    body_query: Query<Entity, With<BodyMesh>>,
    children_query: Query<&Children>,
    render_layers_query: Query<&RenderLayers>,
) {
    let viewmodel = RenderLayers::layer(VIEWMODEL_LAYER);

    for body in body_query.iter() {
        // Recursively collect all descendants
        let mut to_process = vec![body];
        while let Some(entity) = to_process.pop() {
            if render_layers_query.get(entity).ok() != Some(&viewmodel) {
                commands.entity(entity).insert(viewmodel.clone());
            }

            if let Ok(children) = children_query.get(entity) {
                to_process.extend(children.iter());
            }
        }
    }
}

/// Strip the viewmodel layer from dropped items and their descendants.
pub fn return_items_to_world_layer(
    mut commands: Commands,
    dropped_query: Query<Entity, With<ReturnToWorldLayer>>,
    children_query: Query<&Children>,
) {
    for dropped in dropped_query.iter() {
        let mut to_process = vec![dropped];
        while let Some(entity) = to_process.pop() {
            commands.entity(entity).insert(RenderLayers::layer(WORLD_LAYER));

            if let Ok(children) = children_query.get(entity) {
                to_process.extend(children.iter());
            }
        }
        commands.entity(dropped).remove::<ReturnToWorldLayer>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attached_children_join_the_viewmodel_layer() {
        let mut app = App::new();
        app.add_systems(Update, propagate_viewmodel_render_layers);

        let item = app.world_mut().spawn_empty().id();
        let body = app.world_mut().spawn(BodyMesh).add_child(item).id();

        app.update();

        let expected = RenderLayers::layer(VIEWMODEL_LAYER);
        assert_eq!(app.world().get::<RenderLayers>(body), Some(&expected));
        assert_eq!(app.world().get::<RenderLayers>(item), Some(&expected));
    }

    #[test]
    fn dropped_items_return_to_world_layer() {
        let mut app = App::new();
        app.add_systems(Update, return_items_to_world_layer);

        let part = app.world_mut().spawn(RenderLayers::layer(VIEWMODEL_LAYER)).id();
        let item = app
            .world_mut()
            .spawn((ReturnToWorldLayer, RenderLayers::layer(VIEWMODEL_LAYER)))
            .add_child(part)
            .id();

        app.update();

        let expected = RenderLayers::layer(WORLD_LAYER);
        assert_eq!(app.world().get::<RenderLayers>(item), Some(&expected));
        assert_eq!(app.world().get::<RenderLayers>(part), Some(&expected));
        assert!(app.world().get::<ReturnToWorldLayer>(item).is_none());
    }
}
