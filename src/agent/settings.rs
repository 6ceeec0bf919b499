use crate::agent::store::StorePaths;

#[derive(Clone, Debug, PartialEq)]
pub struct AgentSettings {
    name: String,
    discount: f64,
    exploration_threshold: u32,
    store_paths: StorePaths,
    autosave_interval: Option<u32>,
    save_on_final_board: bool,
}

impl Default for AgentSettings {
    fn default() -> Self {
        AgentSettings {
            name: "qchess".to_string(),
            discount: 0.95,
            exploration_threshold: 10,
            store_paths: StorePaths::default(),
            autosave_interval: None,
            save_on_final_board: false,
        }
    }
}

impl AgentSettings {
    pub fn name<S: Into<String>>(mut self, name: S) -> Self {
        self.name = name.into();
        self
    }

    /// Weight of future utility in the update target. Defaults to 0.95
    pub fn discount(mut self, discount: f64) -> Self {
        assert!((0.0..=1.0).contains(&discount));
        self.discount = discount;
        self
    }

    /// Pairs visited fewer times than this are always preferred over well-explored ones. Defaults to 10
    pub fn exploration_threshold(mut self, threshold: u32) -> Self {
        self.exploration_threshold = threshold;
        self
    }

    pub fn store_paths(mut self, store_paths: StorePaths) -> Self {
        self.store_paths = store_paths;
        self
    }

    /// Save the tables after every `moves` moves played. Off by default, since saving blocks the turn
    pub fn autosave_every(mut self, moves: u32) -> Self {
        assert!(moves > 0);
        self.autosave_interval = Some(moves);
        self
    }

    pub fn save_on_final_board(mut self, save: bool) -> Self {
        self.save_on_final_board = save;
        self
    }

    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn get_discount(&self) -> f64 {
        self.discount
    }

    pub fn get_exploration_threshold(&self) -> u32 {
        self.exploration_threshold
    }

    pub fn get_store_paths(&self) -> &StorePaths {
        &self.store_paths
    }

    pub fn get_autosave_interval(&self) -> Option<u32> {
        self.autosave_interval
    }

    pub fn get_save_on_final_board(&self) -> bool {
        self.save_on_final_board
    }
}
