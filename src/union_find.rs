/*!
# Union-Find

Disjoint sets over node positions `0..n` (see [`Graph::index_of`](crate::Graph::index_of)) with
path compression and union-by-rank.
*/

use crate::NodeIndex;

/// Disjoint-set forest. Every element starts as its own representative.
#[derive(Debug, Clone)]
pub struct UnionFind {
    parent: Vec<NodeIndex>,
    rank: Vec<u32>,
}

impl UnionFind {
    /// Creates `n` singleton sets `{0}, ..., {n - 1}`
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n as NodeIndex).collect(),
            rank: vec![0; n],
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    /// Returns the representative of the set containing `x` and re-points every node on the way
    /// directly at it.
    ///
    /// ** Panics if `x >= n` **
    pub fn find(&mut self, x: NodeIndex) -> NodeIndex {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut u = x;
        while u != root {
            let next = self.parent[u as usize];
            self.parent[u as usize] = root;
            u = next;
        }

        root
    }

    /// Merges the sets of `a` and `b`.
    ///
    /// Returns `false` without changing anything if both already share a set, i.e. an edge
    /// `{a, b}` would close a cycle. On equal ranks the root of `b` is attached below the root
    /// of `a`.
    ///
    /// ** Panics if `a >= n || b >= n` **
    pub fn union(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }

        let (rank_a, rank_b) = (self.rank[ra as usize], self.rank[rb as usize]);
        if rank_a > rank_b {
            self.parent[rb as usize] = ra;
        } else if rank_a < rank_b {
            self.parent[ra as usize] = rb;
        } else {
            self.parent[rb as usize] = ra;
            self.rank[ra as usize] += 1;
        }
        true
    }

    /// Returns true if `a` and `b` are in the same set
    pub fn same_set(&mut self, a: NodeIndex, b: NodeIndex) -> bool {
        self.find(a) == self.find(b)
    }
}

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64Mcg;

    use super::*;

    #[test]
    fn singletons() {
        let mut uf = UnionFind::new(4);
        assert_eq!(uf.len(), 4);
        for x in 0..4 {
            assert_eq!(uf.find(x), x);
        }
    }

    #[test]
    fn union_reports_cycles() {
        let mut uf = UnionFind::new(5);
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(1, 3));
        assert!(!uf.union(0, 2));
        assert!(!uf.union(3, 3));
        assert!(uf.same_set(0, 3));
        assert!(!uf.same_set(0, 4));
    }

    #[test]
    fn ties_attach_b_under_a() {
        let mut uf = UnionFind::new(4);
        assert!(uf.union(0, 1));
        assert_eq!(uf.find(1), 0);

        assert!(uf.union(2, 3));
        assert!(uf.union(3, 1));
        // equal ranks: the root of the second argument goes below the root of the first
        assert_eq!(uf.find(0), 2);
    }

    #[test]
    fn path_compression() {
        let mut uf = UnionFind::new(8);
        // build a chain of height 3 by merging equally ranked trees
        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(uf.union(0, 2));
        assert!(uf.union(4, 5));
        assert!(uf.union(6, 7));
        assert!(uf.union(4, 6));
        assert!(uf.union(0, 4));

        assert_eq!(uf.parent[7], 6);
        assert_eq!(uf.find(7), 0);
        assert_eq!(uf.parent[7], 0);
        assert_eq!(uf.parent[6], 0);
    }

    #[test]
    fn random_unions_match_components() {
        let rng = &mut Pcg64Mcg::seed_from_u64(3);

        for n in [10 as NodeIndex, 30, 100] {
            let mut uf = UnionFind::new(n as usize);
            let mut component: Vec<NodeIndex> = (0..n).collect();

            for _ in 0..n {
                let a = rng.random_range(0..n);
                let b = rng.random_range(0..n);

                let merged = uf.union(a, b);
                assert_eq!(merged, component[a as usize] != component[b as usize]);

                let (old, new) = (component[b as usize], component[a as usize]);
                component.iter_mut().filter(|c| **c == old).for_each(|c| *c = new);

                for x in 0..n {
                    let r = uf.find(x);
                    assert_eq!(uf.find(x), r);
                }
                for _ in 0..n {
                    let x = rng.random_range(0..n);
                    let y = rng.random_range(0..n);
                    assert_eq!(
                        uf.same_set(x, y),
                        component[x as usize] == component[y as usize]
                    );
                }
            }
        }
    }
}
