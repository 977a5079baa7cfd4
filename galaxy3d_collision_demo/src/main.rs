//! Headless walkthrough of the collision core.
//!
//! A character drops onto a floor, walks into a wall and slides along it,
//! then the scene is frustum-culled from a fixed camera. Everything is
//! reported through the engine logger.

use galaxy_3d_collision::galaxy3d::camera::Camera;
use galaxy_3d_collision::galaxy3d::log::LogSeverity;
use galaxy_3d_collision::galaxy3d::scene::{
    BruteForceCuller, CameraCuller, EntityFlags, FrustumCuller, MeshEntity, MovementController,
    Scene,
};
use galaxy_3d_collision::galaxy3d::{CollisionConfig, Engine, Result};
use glam::{Mat4, Vec3};

const SOURCE: &str = "galaxy3d_demo";

fn info(message: String) {
    Engine::log(LogSeverity::Info, SOURCE, message);
}

/// Two-triangle quad. Corners go counter-clockwise seen from the solid side.
fn quad(name: &str, corners: [Vec3; 4]) -> Result<MeshEntity> {
    MeshEntity::new(name, corners.to_vec(), vec![0, 1, 2, 0, 2, 3])
}

fn build_scene() -> Result<Scene> {
    let mut scene = Scene::new(CollisionConfig::default())?;
    let solid = EntityFlags::ENABLED | EntityFlags::VISIBLE | EntityFlags::CHECK_COLLISIONS;

    let floor = quad("floor", [
        Vec3::new(-50.0, 0.0, -50.0),
        Vec3::new(-50.0, 0.0, 50.0),
        Vec3::new(50.0, 0.0, 50.0),
        Vec3::new(50.0, 0.0, -50.0),
    ])?;
    scene.add_entity(Box::new(floor.with_flags(solid)));

    // Facing +X
    let wall = quad("wall", [
        Vec3::new(0.0, 0.0, -50.0),
        Vec3::new(0.0, 10.0, -50.0),
        Vec3::new(0.0, 10.0, 50.0),
        Vec3::new(0.0, 0.0, 50.0),
    ])?;
    scene.add_entity(Box::new(wall.with_flags(solid)));

    // Decorative crates, one of them far behind the camera
    for (index, position) in [Vec3::new(8.0, 0.5, -6.0), Vec3::new(4.0, 0.5, 400.0)].into_iter().enumerate() {
        let crate_mesh = MeshEntity::new(
            format!("crate_{}", index),
            vec![
                Vec3::new(-0.5, -0.5, -0.5),
                Vec3::new(0.5, -0.5, 0.5),
                Vec3::new(0.5, 0.5, -0.5),
            ],
            vec![0, 1, 2],
        )?
        .with_world_matrix(Mat4::from_translation(position));
        scene.add_entity(Box::new(crate_mesh));
    }

    Ok(scene)
}

fn run() -> Result<()> {
    let scene = build_scene()?;
    info(format!("scene ready with {} entities", scene.entity_count()));

    let mut controller = MovementController::new(Vec3::new(4.0, 6.0, 0.0));
    controller.set_check_collisions(true);
    controller.set_apply_gravity(true);

    let mut frame = 0;
    while controller.update(&scene, Vec3::ZERO) {
        frame += 1;
        info(format!("frame {}: falling, eye at {}", frame, controller.position()));
        if frame > 20 {
            break;
        }
    }
    info(format!("landed after {} frames at {}", frame, controller.position()));

    let step = Vec3::new(-1.5, 0.0, 0.5);
    for _ in 0..5 {
        controller.update(&scene, step);
        let hit = controller
            .collider()
            .collided_entity()
            .and_then(|key| scene.entity(key))
            .map(|entity| entity.name().to_string())
            .unwrap_or_else(|| "nothing".to_string());
        info(format!("walked to {} (last contact: {})", controller.position(), hit));
    }

    let camera = Camera::looking_at(
        Vec3::new(4.0, 6.0, 20.0), Vec3::new(4.0, 0.0, 0.0),
        std::f32::consts::FRAC_PI_4, 16.0 / 9.0, 0.1, 200.0,
    );

    let everything = BruteForceCuller::new().cull(&scene, &camera);
    let mut frustum_culler = FrustumCuller::new();
    let visible = frustum_culler.cull(&scene, &camera);
    info(format!(
        "{} of {} entities visible, {} culled",
        visible.visible_count(),
        everything.visible_count(),
        frustum_culler.last_culled(),
    ));

    Ok(())
}

fn main() {
    Engine::set_min_severity(LogSeverity::Debug);

    if let Err(error) = run() {
        Engine::log(LogSeverity::Error, SOURCE, format!("demo failed: {}", error));
        std::process::exit(1);
    }
}
