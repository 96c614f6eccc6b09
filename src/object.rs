//! Object editing (component E, object half): reserve/shrink/clear/get/
//! find/set/remove, all requiring the value to already be an
//! [`Value::Object`](crate::value::Value::Object).
//!
//! Lookups are a linear scan, not a hash index — objects are ordered and
//! typically small, and a hash index would not change any observable
//! behavior here anyway (member order and duplicate-key handling are part
//! of the contract, not an implementation detail a hash could hide).

use crate::value::{Member, Value};

impl Value {
    /// Number of members currently in the object.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not an object.
    pub fn object_len(&self) -> usize {
        self.as_object_vec().len()
    }

    /// Current storage capacity of the object.
    pub fn object_capacity(&self) -> usize {
        self.as_object_vec().capacity()
    }

    /// Reallocates so that capacity becomes at least `capacity`; a no-op if
    /// the object already holds that much room.
    pub fn object_reserve(&mut self, capacity: usize) {
        let v = self.as_object_vec_mut();
        if capacity > v.capacity() {
            v.reserve_exact(capacity - v.len());
        }
    }

    /// Shrinks capacity down to the current length.
    pub fn object_shrink(&mut self) {
        self.as_object_vec_mut().shrink_to_fit();
    }

    /// Frees every member, keeping the object's capacity.
    pub fn object_clear(&mut self) {
        self.as_object_vec_mut().clear();
    }

    /// Borrows the member at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not an object or `index` is out of bounds.
    pub fn object_get(&self, index: usize) -> &Member {
        &self.as_object_vec()[index]
    }

    /// Mutably borrows the value of the member at `index`.
    pub fn object_get_mut(&mut self, index: usize) -> &mut Value {
        &mut self.as_object_vec_mut()[index].value
    }

    /// The index of the first member whose key equals `key`, `None` if
    /// absent.
    pub fn object_find_index(&self, key: &[u8]) -> Option<usize> {
        self.as_object_vec().iter().position(|m| m.key == key)
    }

    /// The value of the first member whose key equals `key`, `None` if
    /// absent.
    pub fn object_find(&self, key: &[u8]) -> Option<&Value> {
        self.object_find_index(key).map(|i| &self.as_object_vec()[i].value)
    }

    /// Mutably borrows the value of the first member whose key equals
    /// `key`, `None` if absent.
    pub fn object_find_mut(&mut self, key: &[u8]) -> Option<&mut Value> {
        let index = self.object_find_index(key)?;
        Some(&mut self.as_object_vec_mut()[index].value)
    }

    /// Returns the value slot for `key`, creating a new `Null`-valued
    /// member (with a copy of `key`) if none exists yet.
    ///
    /// Idempotent on keys: calling this twice with the same key never
    /// grows the object, and the second call returns the same slot the
    /// first one created (preserving the key's original insertion
    /// position), matching a document that already has duplicate keys
    /// from parsing, where `set_value` always reuses the *first* match.
    pub fn object_entry(&mut self, key: &[u8]) -> &mut Value {
        if let Some(index) = self.object_find_index(key) {
            return &mut self.as_object_vec_mut()[index].value;
        }
        let v = self.as_object_vec_mut();
        if v.len() == v.capacity() {
            let grown = (v.capacity() * 3 / 2).max(1);
            v.reserve_exact(grown - v.len());
        }
        v.push(Member::new(key.to_vec(), Value::Null));
        &mut v.last_mut().unwrap().value
    }

    /// Removes the member at `index`, shifting subsequent members left.
    ///
    /// # Panics
    ///
    /// Panics if `self` is not an object or `index` is out of bounds.
    pub fn object_remove(&mut self, index: usize) {
        let v = self.as_object_vec_mut();
        assert!(index < v.len(), "object_remove index out of bounds");
        v.remove(index);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn entry_creates_then_reuses() {
        let mut o = Value::new_object(0);
        *o.object_entry(b"a") = Value::Number(1.0);
        assert_eq!(o.object_len(), 1);

        // second call to the same key must not grow the object
        *o.object_entry(b"a") = Value::Number(2.0);
        assert_eq!(o.object_len(), 1);
        assert_eq!(o.object_find(b"a"), Some(&Value::Number(2.0)));
        assert_eq!(o.object_find_index(b"a"), Some(0));
    }

    #[test]
    fn find_missing_key_is_none() {
        let o = Value::new_object(0);
        assert_eq!(o.object_find_index(b"missing"), None);
        assert_eq!(o.object_find(b"missing"), None);
    }

    #[test]
    fn remove_shifts_left() {
        let mut o = Value::new_object(0);
        *o.object_entry(b"a") = Value::Number(1.0);
        *o.object_entry(b"b") = Value::Number(2.0);
        *o.object_entry(b"c") = Value::Number(3.0);
        o.object_remove(0);
        assert_eq!(o.object_len(), 2);
        assert_eq!(o.object_get(0).key, b"b");
        assert_eq!(o.object_get(1).key, b"c");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut o = Value::new_object(8);
        *o.object_entry(b"a") = Value::Null;
        let cap = o.object_capacity();
        o.object_clear();
        assert_eq!(o.object_len(), 0);
        assert_eq!(o.object_capacity(), cap);
    }

    #[test]
    #[should_panic]
    fn get_out_of_bounds_panics() {
        let o = Value::new_object(0);
        o.object_get(0);
    }
}
