//! Shape hash - canonical fingerprint of a point set
//!
//! Translate so the min x and min y are zero, sort, join as `x,y;x,y;...`.
//! Equal shapes give equal hashes whatever their position or point order.
//! The empty set hashes to the empty string.

use crate::core::point::{min_corner, Point};

pub fn shape_hash(points: &[Point]) -> String {
    let Some(origin) = min_corner(points) else {
        return String::new();
    };
    let mut normalized: Vec<Point> = points.iter().map(|p| p.offset(-origin.x, -origin.y)).collect();
    normalized.sort_by_key(|p| (p.y, p.x));
    normalized.dedup();

    let mut out = String::with_capacity(normalized.len() * 4);
    for (i, p) in normalized.iter().enumerate() {
        if i > 0 {
            out.push(';');
        }
        out.push_str(&p.x.to_string());
        out.push(',');
        out.push_str(&p.y.to_string());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(raw: &[(i32, i32)]) -> Vec<Point> {
        raw.iter().map(|&p| Point::from(p)).collect()
    }

    #[test]
    fn empty_set_is_the_empty_string() {
        assert_eq!(shape_hash(&[]), "");
    }

    #[test]
    fn translation_and_order_do_not_matter() {
        let a = pts(&[(0, 0), (1, 0), (1, 1)]);
        let b = pts(&[(11, 6), (10, 5), (11, 5)]);
        assert_eq!(shape_hash(&a), shape_hash(&b));
        assert_eq!(shape_hash(&a), "0,0;1,0;1,1");
    }

    #[test]
    fn mirror_images_differ() {
        let l = pts(&[(0, 0), (0, 1), (1, 1)]);
        let j = pts(&[(1, 0), (1, 1), (0, 1)]);
        assert_ne!(shape_hash(&l), shape_hash(&j));
    }
}
