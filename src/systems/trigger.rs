use glam::Vec3;
use hecs::{Entity, World};

use crate::components::{Collider, LocalTransform, TriggerEvent, TriggerOverlaps, TriggerVolume};

/// Shapes reduced to what the overlap tests need.
enum Shape {
    /// Sphere swept along a segment; a sphere is a zero-length segment.
    Swept { a: Vec3, b: Vec3, radius: f32 },
    Aabb { min: Vec3, max: Vec3 },
}

fn trigger_shape(transform: &LocalTransform, volume: &TriggerVolume) -> Shape {
    match *volume {
        TriggerVolume::Sphere { radius } => Shape::Swept {
            a: transform.position,
            b: transform.position,
            radius,
        },
        TriggerVolume::Capsule { radius, height } => {
            let half = transform.rotation * Vec3::Y * (height * 0.5);
            Shape::Swept {
                a: transform.position - half,
                b: transform.position + half,
                radius,
            }
        }
    }
}

fn collider_shape(transform: &LocalTransform, collider: &Collider) -> Shape {
    match *collider {
        Collider::Sphere { radius } => Shape::Swept {
            a: transform.position,
            b: transform.position,
            radius,
        },
        Collider::Capsule { radius, height } => {
            let half = transform.rotation * Vec3::Y * (height * 0.5);
            Shape::Swept {
                a: transform.position - half,
                b: transform.position + half,
                radius,
            }
        }
        Collider::Box { half_extents } => Shape::Aabb {
            min: transform.position - half_extents,
            max: transform.position + half_extents,
        },
    }
}

/// Squared distance between segments p1-q1 and p2-q2.
fn segment_distance_squared(p1: Vec3, q1: Vec3, p2: Vec3, q2: Vec3) -> f32 {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.length_squared();
    let e = d2.length_squared();
    let f = d2.dot(r);

    let (s, t) = if a < 1e-12 && e < 1e-12 {
        (0.0, 0.0)
    } else if a < 1e-12 {
        (0.0, (f / e).clamp(0.0, 1.0))
    } else {
        let c = d1.dot(r);
        if e < 1e-12 {
            ((-c / a).clamp(0.0, 1.0), 0.0)
        } else {
            let b = d1.dot(d2);
            let denom = a * e - b * b;
            let mut s = if denom > 1e-12 {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let mut t = (b * s + f) / e;
            if t < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            }
            (s, t)
        }
    };

    ((p1 + d1 * s) - (p2 + d2 * t)).length_squared()
}

const SEGMENT_SEARCH_STEPS: usize = 48;

/// Squared distance between segment `a..b` and an AABB.
///
/// The distance from `a + t * (b - a)` to the box is convex in `t`, so a
/// ternary search over `[0, 1]` finds the minimum. Each step keeps two thirds
/// of the interval, which leaves it well under `1e-6` after the full run.
fn segment_box_distance_squared(a: Vec3, b: Vec3, min: Vec3, max: Vec3) -> f32 {
    let at = |t: f32| {
        let p = a.lerp(b, t);
        p.distance_squared(p.clamp(min, max))
    };
    let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
    for _ in 0..SEGMENT_SEARCH_STEPS {
        let m1 = lo + (hi - lo) / 3.0;
        let m2 = hi - (hi - lo) / 3.0;
        if at(m1) <= at(m2) {
            hi = m2;
        } else {
            lo = m1;
        }
    }
    at((lo + hi) * 0.5).min(at(0.0)).min(at(1.0))
}

fn overlaps(trigger: &Shape, other: &Shape) -> bool {
    match (trigger, other) {
        (
            Shape::Swept { a: a1, b: b1, radius: r1 },
            Shape::Swept { a: a2, b: b2, radius: r2 },
        ) => {
            let reach = r1 + r2;
            segment_distance_squared(*a1, *b1, *a2, *b2) < reach * reach
        }
        (Shape::Swept { a, b, radius }, Shape::Aabb { min, max })
        | (Shape::Aabb { min, max }, Shape::Swept { a, b, radius }) => {
            segment_box_distance_squared(*a, *b, *min, *max) < radius * radius
        }
        (Shape::Aabb { min: min1, max: max1 }, Shape::Aabb { min: min2, max: max2 }) => {
            min1.cmplt(*max2).all() && min2.cmplt(*max1).all()
        }
    }
}

/// Overlap pass for every trigger volume.
///
/// Diffs this tick's overlaps against the previous tick's and returns the
/// changes: exits first, then enters, each in entity iteration order. An
/// entity that was despawned since the last pass produces an exit.
pub fn trigger_system(world: &mut World) -> Vec<TriggerEvent> {
    let triggers: Vec<(Entity, Shape)> = world
        .query::<(&LocalTransform, &TriggerVolume)>()
        .iter()
        .map(|(entity, (transform, volume))| (entity, trigger_shape(transform, volume)))
        .collect();

    let colliders: Vec<(Entity, Shape)> = world
        .query::<(&LocalTransform, &Collider)>()
        .iter()
        .map(|(entity, (transform, collider))| (entity, collider_shape(transform, collider)))
        .collect();

    let mut events = Vec::new();
    for (trigger, shape) in &triggers {
        let current: Vec<Entity> = colliders
            .iter()
            .filter(|(entity, other)| entity != trigger && overlaps(shape, other))
            .map(|(entity, _)| *entity)
            .collect();

        let previous = world
            .get::<&TriggerOverlaps>(*trigger)
            .map(|o| o.0.clone())
            .unwrap_or_default();

        for &other in &previous {
            if !current.contains(&other) {
                events.push(TriggerEvent::Exit { trigger: *trigger, other });
            }
        }
        for &other in &current {
            if !previous.contains(&other) {
                events.push(TriggerEvent::Enter { trigger: *trigger, other });
            }
        }

        // insert_one replaces the component if it already exists.
        let _ = world.insert_one(*trigger, TriggerOverlaps(current));
    }

    events
}
