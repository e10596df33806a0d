//! Rigid-body physics boundary
//!
//! The gameplay rules only talk to physics through [`PhysicsWorld`]: create
//! bodies, push them, read them back, and receive contact-begin events.
//! [`ArcadeWorld`] is a small zero-gravity engine covering the shapes this
//! game uses (one circle, axis-aligned boxes, a rectangular border).

use std::collections::{BTreeMap, BTreeSet};

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::category::Category;
use super::collision::{
    CollisionResult, box_bounds_collision, box_box_collision, circle_bounds_collision,
    circle_box_collision, reflect_velocity,
};
use crate::consts::POINTS_PER_METER;

/// Opaque reference to a body owned by a physics world
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BodyHandle(pub u32);

bitflags! {
    /// Category bits as seen by the physics engine
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CategoryMask: u32 {
        const BALL = 1 << 0;
        const GROUND = 1 << 1;
        const BLOCK = 1 << 2;
        const PADDLE = 1 << 3;
        const BORDER = 1 << 4;
        const POWER_UP = 1 << 5;
    }
}

impl From<Category> for CategoryMask {
    fn from(category: Category) -> Self {
        match category {
            Category::Ball => CategoryMask::BALL,
            Category::Ground => CategoryMask::GROUND,
            Category::Block => CategoryMask::BLOCK,
            Category::Paddle => CategoryMask::PADDLE,
            Category::Border => CategoryMask::BORDER,
            Category::PowerUp => CategoryMask::POWER_UP,
        }
    }
}

/// Collision shape, centered on the body position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Circle { radius: f32 },
    Rect { size: Vec2 },
    /// Hollow rectangle: bodies collide with its inside edges
    EdgeLoop { size: Vec2 },
}

impl Shape {
    /// Area in square points (edge loops have none)
    pub fn area(&self) -> f32 {
        match *self {
            Shape::Circle { radius } => std::f32::consts::PI * radius * radius,
            Shape::Rect { size } => size.x * size.y,
            Shape::EdgeLoop { .. } => 0.0,
        }
    }
}

/// Everything needed to create a body
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub category: Category,
    /// Categories that physically push this body
    pub collides_with: CategoryMask,
    /// Categories that produce contact events with this body
    pub contacts_with: CategoryMask,
    pub shape: Shape,
    pub pos: Vec2,
    /// Static bodies never move on their own and ignore impulses
    pub dynamic: bool,
    pub friction: f32,
    pub restitution: f32,
    pub allows_rotation: bool,
}

impl BodyDesc {
    /// A static body with host-engine default material
    pub fn new(category: Category, shape: Shape, pos: Vec2) -> Self {
        Self {
            category,
            collides_with: CategoryMask::all(),
            contacts_with: CategoryMask::empty(),
            shape,
            pos,
            dynamic: false,
            friction: 0.2,
            restitution: 0.2,
            allows_rotation: true,
        }
    }
}

/// A contact that started during the last step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Contact {
    pub a: (Category, BodyHandle),
    pub b: (Category, BodyHandle),
}

/// The rigid-body engine the game runs on
pub trait PhysicsWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle;
    /// Removing an unknown body is a no-op
    fn remove_body(&mut self, body: BodyHandle);
    /// Swap a body's collision shape in place, keeping its handle
    fn set_shape(&mut self, body: BodyHandle, shape: Shape);
    fn set_position(&mut self, body: BodyHandle, pos: Vec2);
    fn position(&self, body: BodyHandle) -> Option<Vec2>;
    fn velocity(&self, body: BodyHandle) -> Option<Vec2>;
    /// Change velocity by `impulse / mass` (ignored for static bodies)
    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2);
    /// Advance by `dt` seconds and report contacts that began
    fn step(&mut self, dt: f32) -> Vec<Contact>;
}

#[derive(Debug, Clone)]
struct Body {
    desc: BodyDesc,
    pos: Vec2,
    vel: Vec2,
    inv_mass: f32,
}

impl Body {
    fn mask(&self) -> CategoryMask {
        self.desc.category.into()
    }

    /// Contact between this body and `other`, normal pointing toward `self`
    fn contact_with(&self, other: &Body) -> CollisionResult {
        match (self.desc.shape, other.desc.shape) {
            (Shape::Circle { radius }, Shape::Rect { size }) => {
                circle_box_collision(self.pos, radius, other.pos, size / 2.0)
            }
            (Shape::Rect { .. }, Shape::Circle { .. }) => other.contact_with(self).flipped(),
            (Shape::Rect { size: a }, Shape::Rect { size: b }) => {
                box_box_collision(self.pos, a / 2.0, other.pos, b / 2.0)
            }
            (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => {
                let delta = self.pos - other.pos;
                let dist = delta.length();
                if dist >= ra + rb {
                    return CollisionResult::miss();
                }
                let normal = if dist > 0.0 { delta / dist } else { Vec2::Y };
                CollisionResult {
                    hit: true,
                    point: other.pos + normal * rb,
                    normal,
                    penetration: ra + rb - dist,
                }
            }
            (Shape::Circle { radius }, Shape::EdgeLoop { size }) => {
                circle_bounds_collision(self.pos, radius, other.pos, size / 2.0)
            }
            (Shape::Rect { size }, Shape::EdgeLoop { size: bounds }) => {
                box_bounds_collision(self.pos, size / 2.0, other.pos, bounds / 2.0)
            }
            (Shape::EdgeLoop { .. }, Shape::EdgeLoop { .. }) => CollisionResult::miss(),
            (Shape::EdgeLoop { .. }, _) => other.contact_with(self).flipped(),
        }
    }
}

/// Minimal zero-gravity engine with elastic, frictionless contacts
#[derive(Debug, Clone, Default)]
pub struct ArcadeWorld {
    bodies: BTreeMap<BodyHandle, Body>,
    /// Pairs touching at the end of the last step (lower handle first)
    touching: BTreeSet<(BodyHandle, BodyHandle)>,
    next_id: u32,
}

impl ArcadeWorld {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    pub fn contains(&self, body: BodyHandle) -> bool {
        self.bodies.contains_key(&body)
    }

    /// Overwrite a body's velocity (scenario setup in tests and tools)
    pub fn set_velocity(&mut self, body: BodyHandle, vel: Vec2) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.vel = vel;
        }
    }

    /// Shape of a body, if it exists
    pub fn shape(&self, body: BodyHandle) -> Option<Shape> {
        self.bodies.get(&body).map(|b| b.desc.shape)
    }
}

impl PhysicsWorld for ArcadeWorld {
    fn create_body(&mut self, desc: BodyDesc) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;

        let body = Body {
            pos: desc.pos,
            vel: Vec2::ZERO,
            inv_mass: inverse_mass(&desc),
            desc,
        };
        self.bodies.insert(handle, body);
        handle
    }

    fn remove_body(&mut self, body: BodyHandle) {
        self.bodies.remove(&body);
        self.touching.retain(|&(a, b)| a != body && b != body);
    }

    fn set_shape(&mut self, body: BodyHandle, shape: Shape) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.desc.shape = shape;
            b.inv_mass = inverse_mass(&b.desc);
        }
    }

    fn set_position(&mut self, body: BodyHandle, pos: Vec2) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.pos = pos;
        }
    }

    fn position(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.pos)
    }

    fn velocity(&self, body: BodyHandle) -> Option<Vec2> {
        self.bodies.get(&body).map(|b| b.vel)
    }

    fn apply_impulse(&mut self, body: BodyHandle, impulse: Vec2) {
        if let Some(b) = self.bodies.get_mut(&body) {
            b.vel += impulse * b.inv_mass;
        }
    }

    fn step(&mut self, dt: f32) -> Vec<Contact> {
        for body in self.bodies.values_mut() {
            if body.desc.dynamic {
                body.pos += body.vel * dt;
            }
        }

        let handles: Vec<BodyHandle> = self.bodies.keys().copied().collect();
        let mut touching = BTreeSet::new();
        let mut contacts = Vec::new();

        for (i, &ha) in handles.iter().enumerate() {
            for &hb in &handles[i + 1..] {
                let (a, b) = (&self.bodies[&ha], &self.bodies[&hb]);
                if !a.desc.dynamic && !b.desc.dynamic {
                    continue;
                }

                let a_pushed = a.desc.dynamic && a.desc.collides_with.intersects(b.mask());
                let b_pushed = b.desc.dynamic && b.desc.collides_with.intersects(a.mask());
                let reports = a.desc.contacts_with.intersects(b.mask())
                    || b.desc.contacts_with.intersects(a.mask());
                if !a_pushed && !b_pushed && !reports {
                    continue;
                }

                let hit = a.contact_with(b);
                if !hit.hit {
                    continue;
                }

                if reports {
                    touching.insert((ha, hb));
                    if !self.touching.contains(&(ha, hb)) {
                        contacts.push(Contact {
                            a: (a.desc.category, ha),
                            b: (b.desc.category, hb),
                        });
                    }
                }

                let restitution = a.desc.restitution.max(b.desc.restitution);
                if a_pushed {
                    resolve(self.bodies.get_mut(&ha), hit.normal, hit.penetration, restitution);
                } else if b_pushed {
                    resolve(self.bodies.get_mut(&hb), -hit.normal, hit.penetration, restitution);
                }
            }
        }

        self.touching = touching;
        contacts
    }
}

/// Mass is area / PTM²; static and area-less bodies get zero inverse mass
fn inverse_mass(desc: &BodyDesc) -> f32 {
    let area = desc.shape.area();
    if desc.dynamic && area > 0.0 {
        POINTS_PER_METER * POINTS_PER_METER / area
    } else {
        0.0
    }
}

/// Push a body out of a contact and bounce it
fn resolve(body: Option<&mut Body>, normal: Vec2, penetration: f32, restitution: f32) {
    if let Some(body) = body {
        body.pos += normal * penetration;
        body.vel = reflect_velocity(body.vel, normal, restitution);
    }
}
