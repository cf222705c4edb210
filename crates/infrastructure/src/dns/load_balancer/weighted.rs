use dohgate_domain::{DomainError, Resolver};

/// Weighted random pick over an immutable resolver list.
///
/// Linear scan over cumulative weights; pools are expected to stay in the
/// single digits.
#[derive(Debug, Clone)]
pub struct WeightedSelector {
    resolvers: Vec<Resolver>,
    total_weight: u64,
}

impl WeightedSelector {
    pub fn new(resolvers: Vec<Resolver>) -> Result<Self, DomainError> {
        if resolvers.is_empty() {
            return Err(DomainError::ConfigError(
                "Resolver pool cannot be empty".to_string(),
            ));
        }
        let total_weight = resolvers.iter().map(|r| r.weight as u64).sum();
        Ok(Self {
            resolvers,
            total_weight,
        })
    }

    pub fn resolvers(&self) -> &[Resolver] {
        &self.resolvers
    }

    pub fn len(&self) -> usize {
        self.resolvers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolvers.is_empty()
    }

    pub fn total_weight(&self) -> u64 {
        self.total_weight
    }

    pub fn select(&self) -> &Resolver {
        if self.total_weight == 0 {
            return &self.resolvers[fastrand::usize(..self.resolvers.len())];
        }
        self.pick(fastrand::u64(..self.total_weight))
    }

    /// Resolver whose cumulative weight first exceeds `draw`.
    fn pick(&self, draw: u64) -> &Resolver {
        let mut cumulative = 0u64;
        for resolver in &self.resolvers {
            cumulative += resolver.weight as u64;
            if draw < cumulative {
                return resolver;
            }
        }
        &self.resolvers[0]
    }
}
