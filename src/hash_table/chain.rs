// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

type Link<K, V> = Option<Box<Node<K, V>>>;

/// Chain node, owned by its predecessor (or the chain head)
pub struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    next: Link<K, V>,
}

/// Singly linked list of the entries that share a hash bucket
///
/// New entries are pushed to the front, so for equal keys the
/// newest entry is always found first.
pub struct Chain<K, V> {
    head: Link<K, V>,
    len: usize,
}

impl<K, V> Default for Chain<K, V> {
    fn default() -> Self {
        Self { head: None, len: 0 }
    }
}

impl<K, V> Chain<K, V> {
    /// Number of nodes in the chain
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn push_front(&mut self, key: K, value: V) {
        self.push_front_node(Box::new(Node {
            key,
            value,
            next: None,
        }));
    }

    /// Links an existing node in front of the chain, without allocating.
    pub fn push_front_node(&mut self, mut node: Box<Node<K, V>>) {
        node.next = self.head.take();
        self.head = Some(node);
        self.len += 1;
    }

    /// Unlinks the first node of the chain, without deallocating it.
    pub fn pop_front_node(&mut self) -> Option<Box<Node<K, V>>> {
        let mut node = self.head.take()?;
        self.head = node.next.take();
        self.len -= 1;
        Some(node)
    }

    /// Reverses the chain in place.
    pub fn reverse(&mut self) {
        let mut prev: Link<K, V> = None;
        let mut curr = self.head.take();

        while let Some(mut node) = curr {
            curr = node.next.take();
            node.next = prev;
            prev = Some(node);
        }

        self.head = prev;
    }

    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            next: self.head.as_deref(),
        }
    }
}

impl<K: Eq, V> Chain<K, V> {
    /// Returns the value of the first node matching `key`.
    pub fn find(&self, key: &K) -> Option<&V> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn find_mut(&mut self, key: &K) -> Option<&mut V> {
        let mut link = self.head.as_deref_mut();

        while let Some(node) = link {
            if node.key == *key {
                return Some(&mut node.value);
            }
            link = node.next.as_deref_mut();
        }

        None
    }

    /// Unlinks and returns the first node matching `key`.
    ///
    /// Later nodes with the same key are left in place.
    pub fn remove(&mut self, key: &K) -> Option<(K, V)> {
        let mut link = &mut self.head;

        while link.as_ref().is_some_and(|node| node.key != *key) {
            link = &mut link.as_mut()?.next;
        }

        let mut node = link.take()?;
        *link = node.next.take();
        self.len -= 1;

        Some((node.key, node.value))
    }
}

impl<K, V> Drop for Chain<K, V> {
    // NOTE: The default drop glue would recurse once per node
    fn drop(&mut self) {
        let mut link = self.head.take();

        while let Some(mut node) = link {
            link = node.next.take();
        }
    }
}

impl<K: Clone, V: Clone> Clone for Chain<K, V> {
    fn clone(&self) -> Self {
        let mut chain = Self::default();

        for (key, value) in self.iter() {
            chain.push_front(key.clone(), value.clone());
        }

        // Pushing to the front reversed the order
        chain.reverse();

        chain
    }
}

impl<K: std::fmt::Debug, V: std::fmt::Debug> std::fmt::Debug for Chain<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Iterator over the key-value pairs of a chain, front to back
pub struct Iter<'a, K, V> {
    next: Option<&'a Node<K, V>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            (&node.key, &node.value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn keys(chain: &Chain<u32, char>) -> Vec<u32> {
        chain.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn chain_push_front() {
        let mut chain = Chain::default();
        assert!(chain.is_empty());

        chain.push_front(1, 'a');
        chain.push_front(2, 'b');
        chain.push_front(3, 'c');

        assert_eq!(3, chain.len());
        assert_eq!(vec![3, 2, 1], keys(&chain));
    }

    #[test]
    fn chain_find_first_match() {
        let mut chain = Chain::default();
        chain.push_front(1, 'a');
        chain.push_front(1, 'b');

        assert_eq!(Some(&'b'), chain.find(&1));
        assert_eq!(None, chain.find(&2));

        *chain.find_mut(&1).expect("should exist") = 'z';
        assert_eq!(Some(&'z'), chain.find(&1));
    }

    #[test]
    fn chain_remove_head() {
        let mut chain = Chain::default();
        chain.push_front(1, 'a');
        chain.push_front(2, 'b');

        assert_eq!(Some((2, 'b')), chain.remove(&2));
        assert_eq!(vec![1], keys(&chain));
        assert_eq!(1, chain.len());
    }

    #[test]
    fn chain_remove_middle_and_tail() {
        let mut chain = Chain::default();
        for key in 1..=5 {
            chain.push_front(key, 'x');
        }

        assert_eq!(Some((3, 'x')), chain.remove(&3));
        assert_eq!(vec![5, 4, 2, 1], keys(&chain));

        assert_eq!(Some((1, 'x')), chain.remove(&1));
        assert_eq!(vec![5, 4, 2], keys(&chain));
        assert_eq!(3, chain.len());

        assert_eq!(None, chain.remove(&1));
        assert_eq!(3, chain.len());
    }

    #[test]
    fn chain_remove_only_first_duplicate() {
        let mut chain = Chain::default();
        chain.push_front(7, 'a');
        chain.push_front(8, 'b');
        chain.push_front(7, 'c');

        assert_eq!(Some((7, 'c')), chain.remove(&7));
        assert_eq!(2, chain.len());
        assert_eq!(Some(&'a'), chain.find(&7));
    }

    #[test]
    fn chain_pop_and_reverse() {
        let mut chain = Chain::default();
        for key in 1..=3 {
            chain.push_front(key, 'x');
        }

        chain.reverse();
        assert_eq!(vec![1, 2, 3], keys(&chain));

        let node = chain.pop_front_node().expect("should exist");
        assert_eq!(1, node.key);
        assert_eq!(2, chain.len());

        let mut other = Chain::default();
        other.push_front_node(node);
        assert_eq!(vec![1], keys(&other));
    }

    #[test]
    fn chain_clone_keeps_order() {
        let mut chain = Chain::default();
        for key in 1..=4 {
            chain.push_front(key, 'x');
        }

        let mut copy = chain.clone();
        assert_eq!(keys(&chain), keys(&copy));

        copy.remove(&2);
        assert_eq!(4, chain.len());
        assert_eq!(3, copy.len());
    }

    #[test]
    fn chain_drop_long() {
        let mut chain = Chain::default();
        for key in 0..1_000_000 {
            chain.push_front(key, 'x');
        }
        drop(chain);
    }
}
