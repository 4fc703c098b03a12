//! A per-product FIFO of approved stock, implemented as a small ring buffer
//! (spec §9 "FIFO shelf-life accounting... O(1) amortised").
//!
//! Entries are pushed in non-decreasing `expires_on` order (guaranteed by the
//! forward sweep, whose cursor never moves backward), so expiry and
//! oldest-first consumption both only ever touch the front of the buffer.
use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct StockFifo {
    entries: VecDeque<(f64, i64)>,
}

impl StockFifo {
    pub fn push(&mut self, kg: f64, expires_on: i64) {
        self.entries.push_back((kg, expires_on));
    }

    /// Drops entries whose `expires_on <= now`, returns the total kg wasted.
    pub fn expire(&mut self, now: i64) -> f64 {
        let mut wasted = 0.0;
        while let Some(&(kg, exp)) = self.entries.front() {
            if exp <= now {
                wasted += kg;
                self.entries.pop_front();
            } else {
                break;
            }
        }
        wasted
    }

    /// Consumes up to `amount` kg oldest-first; returns kg actually consumed.
    pub fn consume(&mut self, amount: f64) -> f64 {
        let mut remaining = amount;
        let mut consumed = 0.0;
        while remaining > 1e-12 {
            let Some(&(kg, _)) = self.entries.front() else {
                break;
            };
            if kg <= remaining {
                consumed += kg;
                remaining -= kg;
                self.entries.pop_front();
            } else {
                self.entries[0].0 -= remaining;
                consumed += remaining;
                remaining = 0.0;
            }
        }
        consumed
    }

    pub fn on_hand(&self) -> f64 {
        self.entries.iter().map(|&(kg, _)| kg).sum()
    }
}
