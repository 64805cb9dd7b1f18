//! Priority queue of positions awaiting a tend (max-heap by urgency)

use crate::health::PositionHealth;
use priority_queue::PriorityQueue;
use std::collections::HashMap;

/// Urgency first, then LTV, so the riskier of two equal statuses goes first
type TendPriority = (u8, u128);

pub struct TendQueue {
    queue: PriorityQueue<String, TendPriority>,
    /// Map for O(1) lookups
    map: HashMap<String, PositionHealth>,
}

impl TendQueue {
    pub fn new() -> Self {
        Self {
            queue: PriorityQueue::new(),
            map: HashMap::new(),
        }
    }

    /// Push or update a position; positions that need no tend are dropped
    pub fn push(&mut self, health: PositionHealth) {
        if !health.needs_tend() {
            self.remove(&health.name);
            return;
        }

        let priority = (health.status.urgency(), health.ltv);
        self.queue.push(health.name.clone(), priority);
        self.map.insert(health.name.clone(), health);
    }

    /// Pop the most urgent position
    pub fn pop(&mut self) -> Option<PositionHealth> {
        let (name, _priority) = self.queue.pop()?;
        self.map.remove(&name)
    }

    pub fn peek(&self) -> Option<&PositionHealth> {
        let (name, _priority) = self.queue.peek()?;
        self.map.get(name)
    }

    pub fn remove(&mut self, name: &str) -> Option<PositionHealth> {
        self.queue.remove(name);
        self.map.remove(name)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl Default for TendQueue {
    fn default() -> Self {
        Self::new()
    }
}
