use crate::models::{Floor, Request};

/// The four nearest stops around an elevator's current floor.
///
/// Pickups come from Active requests, drop-offs from Boarded requests with a destination.
/// Requests exactly at the current floor are not landmarks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Landmarks {
    pub pickup_above: Option<Floor>,
    pub dropoff_above: Option<Floor>,
    pub pickup_below: Option<Floor>,
    pub dropoff_below: Option<Floor>,
}

impl Landmarks {
    pub fn from_requests<'a>(requests: impl IntoIterator<Item = &'a Request>, current_floor: Floor) -> Self {
        let mut landmarks = Landmarks::default();
        for request in requests {
            if request.is_active() {
                landmarks.observe(request.pickup_floor, current_floor, Stop::Pickup);
            } else if let (true, Some(destination)) = (request.is_boarded(), request.destination_floor) {
                landmarks.observe(destination, current_floor, Stop::Dropoff);
            }
        }
        landmarks
    }

    fn observe(&mut self, floor: Floor, current_floor: Floor, stop: Stop) {
        let (above, below) = match stop {
            Stop::Pickup => (&mut self.pickup_above, &mut self.pickup_below),
            Stop::Dropoff => (&mut self.dropoff_above, &mut self.dropoff_below),
        };
        if floor > current_floor {
            *above = Some(above.map_or(floor, |nearest| nearest.min(floor)));
        } else if floor < current_floor {
            *below = Some(below.map_or(floor, |nearest| nearest.max(floor)));
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.anything_above() && !self.anything_below()
    }

    pub fn has_dropoffs(&self) -> bool {
        self.dropoff_above.is_some() || self.dropoff_below.is_some()
    }

    pub fn anything_above(&self) -> bool {
        self.pickup_above.is_some() || self.dropoff_above.is_some()
    }

    pub fn anything_below(&self) -> bool {
        self.pickup_below.is_some() || self.dropoff_below.is_some()
    }
}

enum Stop {
    Pickup,
    Dropoff,
}
