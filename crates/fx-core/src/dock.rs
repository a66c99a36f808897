//! Morphing particle dock driven by scroll progress through the services cards.

use crate::camera::Camera;
use crate::cloud::{validate_kind, CloudStyle, PointCloud, ShapeDefinition, ShapeKind};
use crate::constants::*;
use crate::easing::Easing;
use crate::error::{ensure_points, FxError, FxResult};
use crate::input::InputEvent;
use crate::morph::{MorphSequencer, MorphStatus, ScrollMorphDriver, ScrollStep};
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};
use std::time::Duration;

#[derive(Clone, Debug)]
pub struct ShapeRecipe {
    pub name: &'static str,
    pub kind: ShapeKind,
    pub color: [f32; 3],
}

/// The four dock states, in scroll order.
pub fn default_recipes() -> Vec<ShapeRecipe> {
    vec![
        ShapeRecipe {
            name: "sphere",
            kind: ShapeKind::Shell {
                radius: SHELL_RADIUS,
                jitter: SHELL_JITTER,
            },
            color: COLOR_ACCENT,
        },
        ShapeRecipe {
            name: "cube",
            kind: ShapeKind::Cube { side: CUBE_SIDE },
            color: COLOR_BRAND,
        },
        ShapeRecipe {
            name: "torus",
            kind: ShapeKind::Torus {
                major: TORUS_MAJOR,
                minor: TORUS_MINOR,
            },
            color: COLOR_BRAND_LIGHT,
        },
        ShapeRecipe {
            name: "faceted",
            kind: ShapeKind::FacetedSphere {
                radius: FACETED_RADIUS,
                steps: FACET_STEPS,
            },
            color: COLOR_BRAND_DARK,
        },
    ]
}

#[derive(Clone, Debug)]
pub struct DockConfig {
    pub point_count: usize,
    pub recipes: Vec<ShapeRecipe>,
    pub style: CloudStyle,
    pub morph_duration: f32,
    pub easing: Easing,
    pub card_count: usize,
    pub cards_per_shape: usize,
    pub desktop_min_width: f32,
    pub spin: Vec2,
    pub fov_deg: f32,
    pub camera_z: f32,
    /// Dock canvas size, fixes the camera aspect.
    pub canvas_size: Vec2,
    /// Window width, decides whether the pinned scroll layout is active.
    pub window_width: f32,
    pub seed: u64,
}

impl Default for DockConfig {
    fn default() -> Self {
        Self {
            point_count: DOCK_POINT_COUNT,
            recipes: default_recipes(),
            style: CloudStyle::additive(DOCK_POINT_SIZE, DOCK_OPACITY),
            morph_duration: MORPH_DURATION_SEC,
            easing: Easing::ExpoInOut,
            card_count: CARD_COUNT,
            cards_per_shape: CARDS_PER_SHAPE,
            desktop_min_width: DESKTOP_MIN_WIDTH_PX,
            spin: Vec2::new(DOCK_SPIN_X, DOCK_SPIN_Y),
            fov_deg: DOCK_FOV_DEG,
            camera_z: DOCK_CAMERA_Z,
            canvas_size: Vec2::from(DOCK_VIEWPORT),
            window_width: 1280.0,
            seed: DOCK_SEED,
        }
    }
}

impl DockConfig {
    pub fn validate(&self) -> FxResult<()> {
        ensure_points("dock", self.point_count)?;
        if self.recipes.is_empty() {
            return Err(FxError::NoShapes);
        }
        for r in &self.recipes {
            validate_kind(&r.kind)?;
        }
        // The last card must still land on a defined shape.
        let driver = ScrollMorphDriver::new(self.card_count, self.cards_per_shape)?;
        if driver.shape_count() > self.recipes.len() {
            return Err(FxError::TooFewShapes {
                needed: driver.shape_count(),
                available: self.recipes.len(),
            });
        }
        Ok(())
    }

    /// Every shape is seeded from the base seed and its index, so a config
    /// always yields the same shapes.
    pub fn build_shapes(&self) -> Vec<ShapeDefinition> {
        self.recipes
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let seed = self.seed ^ (i as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);
                ShapeDefinition::generate(r.name, r.kind, self.point_count, seed, r.color)
            })
            .collect()
    }
}

/// Dock scene context: shapes, morph state and the scroll driver.
pub struct DockEngine {
    cloud: PointCloud,
    morph: MorphSequencer,
    driver: ScrollMorphDriver,
    desktop_min_width: f32,
    rotation: Vec2,
    spin: Vec2,
    camera: Camera,
    last_status: MorphStatus,
}

impl DockEngine {
    pub fn create(config: DockConfig) -> FxResult<Self> {
        config.validate()?;
        let shapes = config.build_shapes();
        let cloud = PointCloud::from_shape(&shapes[0], config.style)?;
        let morph = MorphSequencer::new(shapes, config.morph_duration, config.easing)?;
        let mut driver = ScrollMorphDriver::new(config.card_count, config.cards_per_shape)?;
        driver.enabled = config.window_width >= config.desktop_min_width;
        log::info!(
            "[dock] {} points, {} shapes",
            cloud.len(),
            morph.shapes().len()
        );
        Ok(Self {
            cloud,
            morph,
            driver,
            desktop_min_width: config.desktop_min_width,
            rotation: Vec2::ZERO,
            spin: config.spin,
            camera: Camera::new(
                config.fov_deg,
                config.canvas_size,
                Vec3::new(0.0, 0.0, config.camera_z),
            ),
            last_status: MorphStatus::Idle,
        })
    }

    pub fn tick<I>(&mut self, dt: Duration, inputs: I)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for ev in inputs {
            match ev {
                InputEvent::ScrollProgress(p) => {
                    self.on_scroll(p);
                }
                InputEvent::Resize(size) => {
                    self.driver.enabled = size.x >= self.desktop_min_width;
                }
                _ => {}
            }
        }
        self.last_status = self.morph.tick(dt.as_secs_f32(), &mut self.cloud);
        if let MorphStatus::Completed { shape } = self.last_status {
            log::debug!("[dock] settled on shape {shape}");
        }
        self.rotation += self.spin;
    }

    /// Feeds one scroll sample; morphs only when the shape index changes.
    pub fn on_scroll(&mut self, progress: f32) -> Option<ScrollStep> {
        let step = self.driver.update(progress)?;
        if let Some(shape) = step.changed_shape {
            self.morph.morph_to(shape, &self.cloud);
        }
        Some(step)
    }

    pub fn morph_to(&mut self, shape: usize) -> bool {
        self.morph.morph_to(shape, &self.cloud)
    }

    pub fn active_card(&self) -> usize {
        self.driver.active_card()
    }

    pub fn driver(&self) -> &ScrollMorphDriver {
        &self.driver
    }

    pub fn morph(&self) -> &MorphSequencer {
        &self.morph
    }

    pub fn last_status(&self) -> MorphStatus {
        self.last_status
    }

    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    pub fn cloud_mut(&mut self) -> &mut PointCloud {
        &mut self.cloud
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn cloud_matrix(&self) -> Mat4 {
        Mat4::from_quat(Quat::from_euler(
            EulerRot::XYZ,
            self.rotation.x,
            self.rotation.y,
            0.0,
        ))
    }

    pub fn dispose(self) {
        log::info!("[dock] disposed on shape {}", self.morph.current_shape_index());
    }
}
