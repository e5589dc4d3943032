//! Concurrent swipe simulation
//!
//! Drives many concurrent swipes from a synthetic user population through
//! the match service, then reports how many matches each user ended up with.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinSet;

use crate::error::{Result, SwipeError};
use crate::models::{SwipeAction, UserMatchCount};
use crate::services::MatchService;

/// Parameters of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Size of the synthetic user population
    pub num_users: usize,
    /// Number of concurrent swipes to issue
    pub num_swipes: usize,
    /// Probability that a swipe is a like (0.0 to 1.0)
    pub like_probability: f64,
    /// Fixed seed for reproducible draws, random when unset
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_users: 10,
            num_swipes: 100,
            like_probability: 0.8,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.num_users < 2 {
            return Err(SwipeError::Config(format!(
                "simulation needs at least 2 users, got {}",
                self.num_users
            )));
        }
        if !(0.0..=1.0).contains(&self.like_probability) {
            return Err(SwipeError::Config(format!(
                "like probability must be within [0, 1], got {}",
                self.like_probability
            )));
        }
        Ok(())
    }
}

/// Aggregated result of a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub started_at: chrono::DateTime<chrono::Utc>,
    pub elapsed_ms: u64,
    pub swipes: usize,
    pub likes: usize,
    pub dislikes: usize,
    pub matches_created: usize,
    pub failed_swipes: usize,
    pub match_counts: Vec<UserMatchCount>,
}

impl SimulationReport {
    /// Total match set entries across users; each match counts twice
    pub fn total_match_entries(&self) -> usize {
        self.match_counts.iter().map(|c| c.matches).sum()
    }

    /// Write the per-user summary to the log
    pub fn log_summary(&self) {
        tracing::info!("--- MATCH SUMMARY ---");
        for count in &self.match_counts {
            tracing::info!("{} matched with {} users", count.user_id, count.matches);
        }
        tracing::info!(
            "{} swipes ({} likes, {} dislikes, {} failed), {} matches created in {}ms",
            self.swipes,
            self.likes,
            self.dislikes,
            self.failed_swipes,
            self.matches_created,
            self.elapsed_ms
        );
    }
}

#[derive(Debug, Default)]
struct SwipeCounters {
    likes: AtomicUsize,
    dislikes: AtomicUsize,
    matches: AtomicUsize,
    failed: AtomicUsize,
}

/// Synthetic user ids `user1..=userN`
pub fn generate_users(num_users: usize) -> Vec<String> {
    (1..=num_users).map(|i| format!("user{}", i)).collect()
}

/// Concurrent swipe driver
pub struct SwipeSimulator {
    service: MatchService,
    config: SimulationConfig,
    rng: Arc<Mutex<ChaCha8Rng>>,
}

impl SwipeSimulator {
    pub fn new(service: MatchService, config: SimulationConfig) -> Result<Self> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Ok(Self {
            service,
            config,
            rng: Arc::new(Mutex::new(rng)),
        })
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Issue all swipes concurrently, wait for them, then collect match counts
    ///
    /// A failing swipe is logged and counted; it never stops the run.
    pub async fn run(&self) -> Result<SimulationReport> {
        let started_at = chrono::Utc::now();
        let start = Instant::now();

        let users = Arc::new(generate_users(self.config.num_users));
        let counters = Arc::new(SwipeCounters::default());
        let mut tasks = JoinSet::new();

        tracing::info!(
            "Starting simulation with {} users and {} swipes",
            self.config.num_users,
            self.config.num_swipes
        );

        for _ in 0..self.config.num_swipes {
            let service = self.service.clone();
            let users = Arc::clone(&users);
            let rng = Arc::clone(&self.rng);
            let counters = Arc::clone(&counters);
            let like_probability = self.config.like_probability;

            tasks.spawn(async move {
                let (from, to, action) = draw_swipe(&rng, &users, like_probability);

                match service.submit_swipe(&from, &to, action).await {
                    Ok(matched) => {
                        let counter = match action {
                            SwipeAction::Like => &counters.likes,
                            SwipeAction::Dislike => &counters.dislikes,
                        };
                        counter.fetch_add(1, Ordering::Relaxed);
                        tracing::info!("{} -> {} {}", from, action, to);

                        if matched {
                            counters.matches.fetch_add(1, Ordering::Relaxed);
                            tracing::info!("MATCH! {} <3 {}", from, to);
                        }
                    }
                    Err(e) => {
                        counters.failed.fetch_add(1, Ordering::Relaxed);
                        tracing::warn!("Swipe failed: {} -> {} ({}): {}", from, to, action, e);
                    }
                }
            });
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                counters.failed.fetch_add(1, Ordering::Relaxed);
                tracing::warn!("Swipe task did not complete: {}", e);
            }
        }

        let mut match_counts = Vec::with_capacity(users.len());
        for user in users.iter() {
            match self.service.list_matches(user).await {
                Ok(matches) => match_counts.push(UserMatchCount {
                    user_id: user.clone(),
                    matches: matches.len(),
                }),
                Err(e) => tracing::warn!("Failed to read matches for {}: {}", user, e),
            }
        }

        Ok(SimulationReport {
            started_at,
            elapsed_ms: start.elapsed().as_millis() as u64,
            swipes: self.config.num_swipes,
            likes: counters.likes.load(Ordering::Relaxed),
            dislikes: counters.dislikes.load(Ordering::Relaxed),
            matches_created: counters.matches.load(Ordering::Relaxed),
            failed_swipes: counters.failed.load(Ordering::Relaxed),
            match_counts,
        })
    }
}

/// Pick two distinct users and an action from the shared generator
fn draw_swipe(
    rng: &Mutex<ChaCha8Rng>,
    users: &[String],
    like_probability: f64,
) -> (String, String, SwipeAction) {
    let mut rng = rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());

    let from = rng.gen_range(0..users.len());
    let mut to = rng.gen_range(0..users.len() - 1);
    if to >= from {
        to += 1;
    }

    let action = if rng.gen_bool(like_probability) {
        SwipeAction::Like
    } else {
        SwipeAction::Dislike
    };

    (users[from].clone(), users[to].clone(), action)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::MemoryStore;

    async fn service() -> MatchService {
        let service = MatchService::new(Arc::new(MemoryStore::new()));
        service.setup(true).await.unwrap();
        service
    }

    #[test]
    fn test_generate_users() {
        assert_eq!(generate_users(3), vec!["user1", "user2", "user3"]);
        assert!(generate_users(0).is_empty());
    }

    #[test]
    fn test_config_validation() {
        assert!(SimulationConfig::default().validate().is_ok());

        let config = SimulationConfig { num_users: 1, ..Default::default() };
        assert!(matches!(config.validate(), Err(SwipeError::Config(_))));

        let config = SimulationConfig { like_probability: 1.5, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_draw_swipe_picks_distinct_users() {
        let rng = Mutex::new(ChaCha8Rng::seed_from_u64(7));
        let users = generate_users(2);

        for _ in 0..200 {
            let (from, to, _) = draw_swipe(&rng, &users, 0.8);
            assert_ne!(from, to);
        }
    }

    #[test]
    fn test_draw_swipe_respects_probability_bounds() {
        let rng = Mutex::new(ChaCha8Rng::seed_from_u64(42));
        let users = generate_users(5);

        for _ in 0..50 {
            assert_eq!(draw_swipe(&rng, &users, 1.0).2, SwipeAction::Like);
            assert_eq!(draw_swipe(&rng, &users, 0.0).2, SwipeAction::Dislike);
        }
    }

    #[tokio::test]
    async fn test_run_reports_every_user() {
        let config = SimulationConfig {
            num_users: 5,
            num_swipes: 200,
            like_probability: 0.8,
            seed: Some(1),
        };
        let simulator = SwipeSimulator::new(service().await, config).unwrap();
        let report = simulator.run().await.unwrap();

        assert_eq!(report.match_counts.len(), 5);
        assert_eq!(report.likes + report.dislikes, 200);
        assert_eq!(report.failed_swipes, 0);
        assert_eq!(report.total_match_entries(), report.matches_created * 2);
    }

    #[tokio::test]
    async fn test_run_isolates_failures() {
        let store = Arc::new(MemoryStore::new());
        let service = MatchService::new(store.clone());
        service.setup(true).await.unwrap();
        store.set_available(false);

        let config = SimulationConfig {
            num_users: 3,
            num_swipes: 20,
            seed: Some(3),
            ..Default::default()
        };
        let report = SwipeSimulator::new(service, config).unwrap().run().await.unwrap();

        assert_eq!(report.failed_swipes, 20);
        assert_eq!(report.likes + report.dislikes, 0);
        assert!(report.match_counts.is_empty());
    }
}
