// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indexes a small street grid of rectangular blocks plus one polygonal
//! park, then answers point and window queries against it.
//!
//! Run with `RUST_LOG=debug` to watch the tree split and reinsert as the
//! blocks go in.

use canopy_index::{BoundingBox, Point, RsTree};
use canopy_shapes::{LinearRing, Polygon, Rect, Shape};

/// The indexable shapes in this demo.
#[derive(Debug, PartialEq)]
enum Parcel {
    Block(Rect),
    Park(Polygon),
}

impl Shape for Parcel {
    fn bounding_box(&self) -> BoundingBox {
        match self {
            Self::Block(rect) => rect.bounding_box(),
            Self::Park(polygon) => polygon.bounding_box(),
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        match self {
            Self::Block(rect) => rect.contains(x, y),
            Self::Park(polygon) => polygon.contains(x, y),
        }
    }

    fn overlaps(&self, bb: &BoundingBox) -> bool {
        match self {
            Self::Block(rect) => rect.overlaps(bb),
            Self::Park(polygon) => polygon.overlaps(bb),
        }
    }
}

fn main() {
    env_logger::init();

    let mut city = RsTree::new(8, 2).expect("valid entry limits");

    // A 10 by 10 grid of blocks, each 80 by 80 with 20-wide streets.
    for row in 0..10 {
        for column in 0..10 {
            let x = f64::from(column) * 100.0;
            let y = f64::from(row) * 100.0;
            let block = Rect::new(x, y, x + 80.0, y + 80.0).expect("valid block");
            city.insert(Parcel::Block(block));
        }
    }

    // A triangular park cut diagonally across three blocks.
    let ring = LinearRing::new(&[
        Point::new(420.0, 420.0),
        Point::new(680.0, 420.0),
        Point::new(420.0, 680.0),
    ])
    .expect("valid ring");
    city.insert(Parcel::Park(Polygon::new(ring)));

    println!("indexed {} parcels, tree height {}", city.len(), city.height());

    let probe = Point::new(450.0, 450.0);
    let hits = city.search_point(probe);
    println!("{} parcels cover {probe:?}:", hits.len());
    for parcel in &hits {
        println!("  {parcel:?}");
    }

    let window = BoundingBox::new(390.0, 390.0, 610.0, 610.0).expect("valid window");
    let hits = city.search_box(&window);
    println!("{} parcels overlap the {window:?} window", hits.len());

    // Clear a block to make room, then check the window again.
    let gone = Rect::new(400.0, 400.0, 480.0, 480.0).expect("valid block");
    let removed = city.delete(&Parcel::Block(gone));
    println!("removed the block at (400, 400): {removed}");
    println!(
        "{} parcels overlap the window now",
        city.search_box(&window).len()
    );
}
