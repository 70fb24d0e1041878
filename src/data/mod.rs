//! Database repository layer for the schedule domain.
//!
//! Repositories own all queries, inserts, updates, and deletes, and are the
//! only place the ordering/numbering invariants are mutated. Each repository
//! is generic over `ConnectionTrait` so the same methods run against a plain
//! connection or inside a fire transaction.

pub mod schedule;
pub mod schedule_message;
pub mod schedule_tag;

#[cfg(test)]
mod test;
