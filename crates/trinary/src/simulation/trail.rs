use crate::physics::math::Vector;
use std::collections::VecDeque;

/// Recent positions of one body, oldest first
///
/// Display history only: the physics never reads it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Trail {
    points: VecDeque<Vector>,
    max_points: usize,
}

impl Trail {
    pub fn new(max_points: usize) -> Self {
        Self {
            points: VecDeque::with_capacity(max_points),
            max_points,
        }
    }

    pub fn add_point(&mut self, position: Vector) {
        self.points.push_back(position);
        self.drop_oldest();
    }

    /// Change the capacity, discarding the oldest points if it shrank.
    pub fn set_max_points(&mut self, max_points: usize) {
        self.max_points = max_points;
        self.drop_oldest();
    }

    fn drop_oldest(&mut self) {
        while self.points.len() > self.max_points {
            self.points.pop_front();
        }
    }

    pub fn max_points(&self) -> usize {
        self.max_points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn latest(&self) -> Option<Vector> {
        self.points.back().copied()
    }

    pub fn points(&self) -> impl ExactSizeIterator<Item = &Vector> + '_ {
        self.points.iter()
    }
}
