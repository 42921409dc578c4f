//! Scene population and per-tick animation.
//!
//! Every visual lives in a flat node list with parent links (parents always
//! precede children, so world transforms resolve in one pass). Items own
//! their motion; the registry receives the resulting world positions and the
//! pick list mirrors the ownership tree.

use glam::{Mat4, Quat, Vec2, Vec3, Vec4};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::*;
use crate::core::motion::{self, OrbitState};
use crate::core::records::RepoRecord;
use crate::core::{ItemId, ItemKind, ItemMeta, PickNode, Registry};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MeshKind {
    Cuboid,
    Sphere,
    Torus,
    Cylinder,
}

#[derive(Clone, Copy, Debug)]
pub enum MotionRule {
    Still,
    /// Eased drag + auto rotation; only the card group carries this.
    CardGroup,
    RingSpin {
        speed: f32,
        index: f32,
        base_alpha: f32,
    },
    CornerOrbit {
        anchor: Vec3,
        speed: f32,
        radius: f32,
    },
    PanelOrbit {
        orbit: OrbitState,
    },
    BadgeFloat {
        anchor_y: f32,
        float_speed: f32,
        spin_speed: f32,
    },
}

pub struct SceneNode {
    pub mesh: Option<MeshKind>,
    pub parent: Option<usize>,
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
    pub color: Vec4,
    pub emissive: f32,
    pub motion: MotionRule,
    /// Set on the node that carries the item's metadata.
    pub item: Option<ItemId>,
    /// Inherited owner for decorative children (render emphasis lookup).
    pub owner: Option<ItemId>,
    /// Present when the node participates in ray picking.
    pub pick_radius: Option<f32>,
    world: Mat4,
    world_pos: Vec3,
}

pub struct ParticleLayer {
    pub positions: Vec<f32>,
    pub velocities: Vec<f32>,
    pub color: Vec4,
    pub size: f32,
    pub spin_speed: f32,
    pub rotation_y: f32,
    pub rotation_x: f32,
}

#[derive(Clone, Copy, Debug)]
pub struct Light {
    pub position: Vec3,
    pub color: Vec3,
    pub intensity: f32,
}

pub struct Scene {
    nodes: Vec<SceneNode>,
    pub particles: Vec<ParticleLayer>,
    card_item: ItemId,
    target_rotation: Vec2,
    current_rotation: Vec2,
    badge_spin: f32,
}

impl Scene {
    /// Build everything that does not depend on fetched data.
    pub fn new(registry: &mut Registry) -> Self {
        let card_item = registry.register(
            ItemKind::MainCard,
            ItemMeta::new(GITHUB_USERNAME),
            CARD_BASE_GLOW,
        );
        let mut scene = Self {
            nodes: Vec::new(),
            particles: Vec::new(),
            card_item,
            target_rotation: Vec2::ZERO,
            current_rotation: Vec2::ZERO,
            badge_spin: 0.0,
        };
        scene.build_card();
        if ENABLE_PARTICLES {
            scene.build_particles();
        }
        scene
    }

    pub fn card_item(&self) -> ItemId {
        self.card_item
    }

    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Accumulate a drag delta (pixels) into the card's target rotation.
    pub fn apply_drag(&mut self, dx: f32, dy: f32) {
        self.target_rotation.y += dx * DRAG_ROTATE_GAIN;
        self.target_rotation.x += dy * DRAG_ROTATE_GAIN;
    }

    fn push_node(&mut self, node: SceneNode) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    fn child_of(
        &mut self,
        parent: Option<usize>,
        mesh: MeshKind,
        translation: Vec3,
        rotation: Quat,
        scale: Vec3,
        color: Vec4,
        emissive: f32,
        motion: MotionRule,
    ) -> usize {
        let owner = parent.and_then(|p| self.nodes[p].owner);
        self.push_node(SceneNode {
            mesh: Some(mesh),
            parent,
            translation,
            rotation,
            scale,
            color,
            emissive,
            motion,
            item: None,
            owner,
            pick_radius: None,
            world: Mat4::IDENTITY,
            world_pos: translation,
        })
    }

    fn build_card(&mut self) {
        let card_item = self.card_item;
        let group = self.push_node(SceneNode {
            mesh: None,
            parent: None,
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            color: Vec4::ONE,
            emissive: 0.0,
            motion: MotionRule::CardGroup,
            item: Some(card_item),
            owner: Some(card_item),
            pick_radius: None,
            world: Mat4::IDENTITY,
            world_pos: Vec3::ZERO,
        });

        // Card body: emissive front tint over a dark slab.
        self.child_of(
            Some(group),
            MeshKind::Cuboid,
            Vec3::ZERO,
            Quat::IDENTITY,
            Vec3::new(3.5, 4.5, 0.15),
            rgba(COLOR_CARD_FRONT, 1.0),
            CARD_BASE_GLOW,
            MotionRule::Still,
        );

        // Concentric floating rings behind the card, fading outward.
        for i in 0..4 {
            let color = if i % 2 == 0 {
                COLOR_SECONDARY
            } else {
                COLOR_ACCENT
            };
            let base_alpha = 0.4 - i as f32 * 0.08;
            self.child_of(
                Some(group),
                MeshKind::Torus,
                Vec3::new(0.0, 0.0, -0.5 - i as f32 * 0.1),
                Quat::from_rotation_x(std::f32::consts::FRAC_PI_2),
                Vec3::splat(2.8 + i as f32 * 0.35),
                rgba(color, base_alpha),
                0.3,
                MotionRule::RingSpin {
                    speed: 0.001 + i as f32 * 0.0003,
                    index: i as f32,
                    base_alpha,
                },
            );
        }

        // Golden orbs orbiting the four corners.
        let corners = [
            Vec3::new(-1.8, 2.3, 0.3),
            Vec3::new(1.8, 2.3, 0.3),
            Vec3::new(-1.8, -2.3, 0.3),
            Vec3::new(1.8, -2.3, 0.3),
        ];
        for (i, anchor) in corners.into_iter().enumerate() {
            self.child_of(
                Some(group),
                MeshKind::Sphere,
                anchor,
                Quat::IDENTITY,
                Vec3::splat(0.12),
                rgba(COLOR_GOLD, 0.9),
                0.8,
                MotionRule::CornerOrbit {
                    anchor,
                    speed: 0.002 + i as f32 * 0.0005,
                    radius: 0.1,
                },
            );
        }
    }

    fn build_particles(&mut self) {
        let layers = [
            (COLOR_PRIMARY, 0.15_f32, PARTICLE_COUNT / 2, 0.0002_f32),
            (COLOR_SECONDARY, 0.1, PARTICLE_COUNT * 3 / 10, 0.0003),
            (COLOR_ACCENT, 0.08, PARTICLE_COUNT / 5, 0.00015),
        ];
        for (li, (color, size, count, spin_speed)) in layers.into_iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(0x0F0F_0000 + li as u64);
            let mut positions = Vec::with_capacity(count * 3);
            let mut velocities = Vec::with_capacity(count * 3);
            for _ in 0..count * 3 {
                positions.push((rng.gen::<f32>() - 0.5) * 2.0 * PARTICLE_BOUND);
                velocities.push((rng.gen::<f32>() - 0.5) * 0.02);
            }
            self.particles.push(ParticleLayer {
                positions,
                velocities,
                color: rgba(color, 0.8),
                size,
                spin_speed,
                rotation_y: 0.0,
                rotation_x: 0.0,
            });
        }
    }

    /// Create orbiting repository panels from fetched listings. Skipped
    /// entirely when the listing fetch failed.
    pub fn add_repo_panels(&mut self, registry: &mut Registry, repos: &[RepoRecord]) {
        if !ENABLE_REPO_PANELS || repos.is_empty() {
            return;
        }
        let shown = repos.len().min(MAX_REPOS_DISPLAY);
        let angle_step = std::f32::consts::TAU / shown as f32;
        for (i, repo) in repos.iter().take(shown).enumerate() {
            let meta = ItemMeta::new(repo.name.clone())
                .with_tags(repo.tech_tags(MAX_TAGS_DISPLAY))
                .with_badge(repo.stargazers_count);
            let id = registry.register(ItemKind::Repository, meta, PANEL_BASE_GLOW);
            let orbit = OrbitState {
                angle: i as f32 * angle_step,
                radius: PANEL_ORBIT_RADIUS,
                vertical_offset: (i as f32 * 0.5).sin() * 2.0,
            };
            let panel = self.push_node(SceneNode {
                mesh: Some(MeshKind::Cuboid),
                parent: None,
                translation: orbit.position(0.0, PANEL_BOB_AMPLITUDE),
                rotation: Quat::IDENTITY,
                scale: Vec3::new(1.5, 1.2, 0.08),
                color: rgba(COLOR_CARD_FRONT, 1.0),
                emissive: PANEL_BASE_GLOW,
                motion: MotionRule::PanelOrbit { orbit },
                item: Some(id),
                owner: Some(id),
                pick_radius: Some(0.9),
                world: Mat4::IDENTITY,
                world_pos: Vec3::ZERO,
            });
            // Decorative edge frame; pickable but carries no metadata, so a
            // hit walks up to the panel.
            let frame = self.child_of(
                Some(panel),
                MeshKind::Cuboid,
                Vec3::new(0.0, 0.0, 0.03),
                Quat::IDENTITY,
                Vec3::new(1.05, 1.05, 0.5),
                rgba(COLOR_ACCENT, 0.6),
                0.4,
                MotionRule::Still,
            );
            self.nodes[frame].pick_radius = Some(0.95);
        }
    }

    /// Static skill badge column; metadata is the skill name itself.
    pub fn add_skill_badges(&mut self, registry: &mut Registry) {
        if !ENABLE_SKILL_BADGES {
            return;
        }
        for (i, (name, color, anchor_y)) in SKILLS.iter().enumerate() {
            let meta = ItemMeta::new(*name).with_tags([*name]);
            let id = registry.register(ItemKind::Skill, meta, BADGE_BASE_GLOW);
            self.push_node(SceneNode {
                mesh: Some(MeshKind::Cylinder),
                parent: None,
                translation: Vec3::new(-6.0 + i as f32 * 1.5, *anchor_y, -5.0),
                rotation: Quat::from_rotation_z(std::f32::consts::FRAC_PI_2),
                scale: Vec3::new(0.4, 0.1, 0.4),
                color: rgba(*color, 1.0),
                emissive: BADGE_BASE_GLOW,
                motion: MotionRule::BadgeFloat {
                    anchor_y: *anchor_y,
                    float_speed: 0.001 + i as f32 * 0.0002,
                    spin_speed: BADGE_SPIN_SPEED,
                },
                item: Some(id),
                owner: Some(id),
                pick_radius: Some(0.5),
                world: Mat4::IDENTITY,
                world_pos: Vec3::ZERO,
            });
        }
    }

    /// Step every motion rule, then resolve world transforms and push item
    /// positions into the registry. `scale_of` is the eased emphasis scale
    /// for item roots; decorations inherit it through the parent transform.
    pub fn animate(
        &mut self,
        time: f32,
        dragging: bool,
        registry: &mut Registry,
        scale_of: impl Fn(ItemId) -> f32,
    ) {
        if !dragging {
            self.target_rotation.y += AUTO_ROTATE_SPEED;
        }
        self.current_rotation.x = motion::exp_approach(
            self.current_rotation.x,
            self.target_rotation.x,
            ROTATION_EASE_ALPHA,
        );
        self.current_rotation.y = motion::exp_approach(
            self.current_rotation.y,
            self.target_rotation.y,
            ROTATION_EASE_ALPHA,
        );
        self.badge_spin += 1.0;

        for i in 0..self.nodes.len() {
            let rule = self.nodes[i].motion;
            match rule {
                MotionRule::Still => {}
                MotionRule::CardGroup => {
                    self.nodes[i].rotation = Quat::from_rotation_x(self.current_rotation.x)
                        * Quat::from_rotation_y(self.current_rotation.y);
                }
                MotionRule::RingSpin {
                    speed,
                    index,
                    base_alpha,
                } => {
                    let node = &mut self.nodes[i];
                    node.rotation *= Quat::from_rotation_y(speed);
                    node.translation.y = motion::ring_bob(time, index);
                    node.color.w = base_alpha + (time * 3.0 + index).sin() * 0.1;
                }
                MotionRule::CornerOrbit {
                    anchor,
                    speed,
                    radius,
                } => {
                    self.nodes[i].translation = motion::corner_orbit(anchor, time, speed, radius);
                }
                MotionRule::PanelOrbit { mut orbit } => {
                    orbit.step(PANEL_ORBIT_SPEED);
                    let pos = orbit.position(time, PANEL_BOB_AMPLITUDE);
                    let node = &mut self.nodes[i];
                    node.translation = pos;
                    // Face the origin.
                    node.rotation = Quat::from_rotation_y((-pos.x).atan2(-pos.z));
                    let breathe = motion::breathe_scale(time, orbit.angle, PANEL_BREATHE_AMPLITUDE);
                    node.scale = Vec3::new(1.5, 1.2, 0.08) * breathe;
                    node.motion = MotionRule::PanelOrbit { orbit };
                }
                MotionRule::BadgeFloat {
                    anchor_y,
                    float_speed,
                    spin_speed,
                } => {
                    let node = &mut self.nodes[i];
                    node.translation.y =
                        anchor_y + motion::float_offset(time, float_speed, BADGE_FLOAT_RANGE);
                    node.rotation = Quat::from_rotation_y(self.badge_spin * spin_speed)
                        * Quat::from_rotation_z(std::f32::consts::FRAC_PI_2);
                }
            }
        }

        // World transforms; parents always precede children in the list.
        for i in 0..self.nodes.len() {
            let node = &self.nodes[i];
            let mut scale = node.scale;
            if let Some(id) = node.item {
                scale *= scale_of(id);
            }
            let local = Mat4::from_scale_rotation_translation(scale, node.rotation, node.translation);
            let world = match node.parent {
                Some(p) => self.nodes[p].world * local,
                None => local,
            };
            let world_pos = world.w_axis.truncate();
            let node = &mut self.nodes[i];
            node.world = world;
            node.world_pos = world_pos;
        }
        for node in &self.nodes {
            if let Some(id) = node.item {
                registry.set_position(id, node.world_pos);
            }
        }

        for layer in &mut self.particles {
            layer.rotation_y += layer.spin_speed;
            layer.rotation_x += layer.spin_speed * 0.5;
            motion::drift_particles(
                &mut layer.positions,
                &layer.velocities,
                PARTICLE_DRIFT_GAIN,
                PARTICLE_BOUND,
            );
        }
    }

    /// Snapshot of the pickable ownership tree for the pointer evaluator.
    /// The main card never participates.
    pub fn pick_nodes(&self) -> Vec<PickNode> {
        let mut out = Vec::new();
        let mut remap = vec![usize::MAX; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            let Some(radius) = node.pick_radius else {
                continue;
            };
            remap[i] = out.len();
            let parent = node
                .parent
                .and_then(|p| (remap[p] != usize::MAX).then(|| remap[p]));
            out.push(PickNode {
                center: node.world_pos,
                radius,
                parent,
                item: node.item,
            });
        }
        out
    }

    /// Animated light rig; the gold light chases the pointer.
    pub fn lights(&self, time: f32, pointer_ndc: Vec2) -> [Light; 4] {
        [
            Light {
                position: Vec3::new((time * 0.5).sin() * 8.0, 5.0, (time * 0.5).cos() * 8.0),
                color: Vec3::from(COLOR_PRIMARY),
                intensity: 2.0 + (time * 2.0).sin() * 0.3,
            },
            Light {
                position: Vec3::new(-5.0, -3.0, 5.0),
                color: Vec3::from(COLOR_ACCENT),
                intensity: 1.5,
            },
            Light {
                position: Vec3::new(5.0, -3.0, -5.0),
                color: Vec3::from(COLOR_SECONDARY),
                intensity: 1.5,
            },
            Light {
                position: Vec3::new(pointer_ndc.x * 10.0, pointer_ndc.y * 10.0, 5.0),
                color: Vec3::from(COLOR_GOLD),
                intensity: 1.0,
            },
        ]
    }
}

impl SceneNode {
    pub fn world(&self) -> Mat4 {
        self.world
    }

    pub fn world_pos(&self) -> Vec3 {
        self.world_pos
    }
}

#[inline]
fn rgba(rgb: [f32; 3], a: f32) -> Vec4 {
    Vec4::new(rgb[0], rgb[1], rgb[2], a)
}
