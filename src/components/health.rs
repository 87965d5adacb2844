use bevy_ecs::prelude::Component;

/// Hit points of an entity.
///
/// On pawns this is the damage target of ignite. On `point_viewcontrol`
/// relays the map stores the desired field of view here.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Health(pub i32);
