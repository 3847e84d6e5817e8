use std::sync::atomic::{AtomicU64, Ordering};

macro_rules! unique_id {
    ($($(#[$meta:meta])* $vis:vis struct $name:ident;)*) => {
        $(
            $(#[$meta])*
            #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
            $vis struct $name(u64);

            impl $name {
                pub(crate) fn next() -> Self {
                    static COUNTER: AtomicU64 = AtomicU64::new(1);
                    Self(COUNTER.fetch_add(1, Ordering::Relaxed))
                }

                pub fn value(self) -> u64 {
                    self.0
                }
            }
        )*
    };
}

unique_id! {
    /// Process-unique identity of a [`Structure`](super::structure::Structure).
    pub struct StructureId;
    /// Process-unique identity of a parsed or constructed selection.
    pub struct SelectionId;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_ids_are_distinct_and_increasing() {
        let a = StructureId::next();
        let b = StructureId::next();
        assert_ne!(a, b);
        assert!(b.value() > a.value());
    }

    #[test]
    fn id_kinds_use_independent_counters() {
        let s1 = SelectionId::next();
        let _ = StructureId::next();
        let s2 = SelectionId::next();
        assert!(s2 > s1);
    }
}
