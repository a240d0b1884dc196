/// Collection detection between the plane and falling entities.

use log::debug;

use crate::entities::{FallingEntity, FallingKind, Player, Rect};

/// Outcome of testing one collection of falling entities against the plane.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collection {
    /// Indices (into the tested slice) of every entity the plane touched,
    /// in ascending order.
    pub collected: Vec<usize>,
    pub score_delta: i32,
    pub flag_delta: u32,
}

/// Strict AABB overlap of two half-open rectangles.  Rectangles that only
/// share an edge do not overlap.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

/// Test every entity against the plane independently and total up the
/// score effect of the ones it touches.
pub fn detect(player: &Player, entities: &[FallingEntity]) -> Collection {
    let mut result = Collection::default();

    for (i, entity) in entities.iter().enumerate() {
        if !overlaps(&player.rect, &entity.rect) {
            continue;
        }
        result.collected.push(i);
        match entity.kind {
            FallingKind::Tower => result.score_delta += 1,
            FallingKind::Flag => {
                result.score_delta -= 1;
                result.flag_delta += 1;
            }
        }
        debug!("collected {:?} at ({}, {})", entity.kind, entity.rect.x, entity.rect.y);
    }

    result
}

/// Drop the entities listed in `collection`, keeping the order of the rest.
pub fn remove_collected(entities: &[FallingEntity], collection: &Collection) -> Vec<FallingEntity> {
    entities
        .iter()
        .enumerate()
        .filter(|(i, _)| collection.collected.binary_search(i).is_err())
        .map(|(_, e)| e.clone())
        .collect()
}
