use crate::core::camera::components::OrbitCamera;
use crate::core::camera::logic::{apply_drag, home_angles, orbit_translation, zoomed_radius};
use crate::simulation::ActiveSession;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::PI;

/// Pixels per scroll line for touchpads.
const PIXELS_PER_LINE: f32 = 40.0;

pub fn spawn_camera(mut commands: Commands) {
    let config = fluidcore::get_config();
    let (alpha, beta) = home_angles(&config.camera);
    let orbit = OrbitCamera {
        alpha,
        beta,
        radius: config.volume.default_zoom,
        target: Vec3::ZERO,
    };
    let translation = orbit_translation(orbit.alpha, orbit.beta, orbit.radius, orbit.target);

    commands.spawn((
        Camera3d::default(),
        Transform::from_translation(translation).looking_at(orbit.target, Vec3::Y),
        orbit,
    ));

    commands.spawn((
        Transform::from_rotation(Quat::from_euler(EulerRot::ZYX, 0.0, 1.0, -PI / 4.)),
        DirectionalLight::default(),
    ));
    commands.spawn((
        PointLight {
            intensity: 2_000_000.0,
            range: 200.0,
            ..default()
        },
        Transform::from_xyz(0.0, 30.0, -20.0),
    ));

    info!("Camera spawned");
}

/// Right drag orbits, the wheel zooms. Zoom goes through the session so the
/// slider in the panel stays in sync.
pub fn camera_control(
    mouse_input: Res<ButtonInput<MouseButton>>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mut contexts: EguiContexts,
    session: Option<ResMut<ActiveSession>>,
    mut camera_q: Query<&mut OrbitCamera>,
) {
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }
    let Ok(mut orbit) = camera_q.single_mut() else {
        return;
    };

    if mouse_input.pressed(MouseButton::Right) && mouse_motion.delta != Vec2::ZERO {
        let (alpha, beta) = apply_drag(orbit.alpha, orbit.beta, mouse_motion.delta);
        orbit.alpha = alpha;
        orbit.beta = beta;
    }

    let lines = match mouse_scroll.unit {
        MouseScrollUnit::Line => mouse_scroll.delta.y,
        MouseScrollUnit::Pixel => mouse_scroll.delta.y / PIXELS_PER_LINE,
    };
    if lines != 0.0
        && let Some(mut active) = session
    {
        let radius = zoomed_radius(active.session.controls().zoom_level(), lines);
        active.session.set_zoom(radius);
    }
}

pub fn apply_orbit(mut camera_q: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>) {
    for (orbit, mut transform) in &mut camera_q {
        let translation = orbit_translation(orbit.alpha, orbit.beta, orbit.radius, orbit.target);
        *transform = Transform::from_translation(translation).looking_at(orbit.target, Vec3::Y);
    }
}
