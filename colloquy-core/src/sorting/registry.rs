//! Alias registry for user-facing sort options
//!
//! Front ends expose choices such as "newest first" or "top rated"; the
//! registry maps those aliases to configured [`DirectedSorter`]s and
//! resolves a default when the caller does not ask for one.

use std::collections::HashMap;
use std::fmt;

use colloquy_model::{CommentNode, CommentTree, Direction};
use tracing::{debug, warn};

use super::directed::{DirectedSorter, DynSorter, SortOptions};
use super::error::{Result, SortError};
use super::strategy::StrategyKind;
use super::traits::{CommentComparator, HasScore, HasUpdatedAt};

pub const DATE_ASC: &str = "date_asc";
pub const DATE_DESC: &str = "date_desc";
pub const SCORE_DESC: &str = "score_desc";

pub struct SortingRegistry<C> {
    sorters: HashMap<String, DynSorter<C>>,
    default_alias: String,
}

impl<C> fmt::Debug for SortingRegistry<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sorters: Vec<_> = self
            .sorters
            .iter()
            .map(|(alias, sorter)| {
                (
                    alias.as_str(),
                    CommentComparator::<C>::name(sorter.strategy()),
                    sorter.direction(),
                )
            })
            .collect();
        sorters.sort_by(|a, b| a.0.cmp(b.0));

        f.debug_struct("SortingRegistry")
            .field("default_alias", &self.default_alias)
            .field("sorters", &sorters)
            .finish()
    }
}

impl<C> SortingRegistry<C> {
    /// Empty registry. `default_alias` must be registered before
    /// [`get`](Self::get) is called without an alias.
    pub fn new(default_alias: impl Into<String>) -> Self {
        Self {
            sorters: HashMap::new(),
            default_alias: default_alias.into(),
        }
    }

    /// Registers `sorter` under `alias`, replacing any previous entry.
    pub fn register(&mut self, alias: impl Into<String>, sorter: DynSorter<C>) -> &mut Self {
        let alias = alias.into();
        debug!(
            alias = %alias,
            strategy = CommentComparator::<C>::name(sorter.strategy()),
            direction = %sorter.direction(),
            "registering comment sorter"
        );
        if self.sorters.insert(alias.clone(), sorter).is_some() {
            warn!(alias = %alias, "replaced previously registered comment sorter");
        }
        self
    }

    pub fn set_default_alias(&mut self, alias: impl Into<String>) {
        self.default_alias = alias.into();
    }

    pub fn default_alias(&self) -> &str {
        &self.default_alias
    }

    pub fn contains(&self, alias: &str) -> bool {
        self.sorters.contains_key(alias)
    }

    /// Registered aliases in lexical order.
    pub fn aliases(&self) -> Vec<&str> {
        let mut aliases: Vec<_> = self.sorters.keys().map(String::as_str).collect();
        aliases.sort_unstable();
        aliases
    }

    pub fn len(&self) -> usize {
        self.sorters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorters.is_empty()
    }

    /// Resolves `alias`, or the default alias when `None`.
    pub fn get(&self, alias: Option<&str>) -> Result<&DynSorter<C>> {
        let alias = alias.unwrap_or(&self.default_alias);
        self.sorters
            .get(alias)
            .ok_or_else(|| SortError::UnknownSorter(alias.to_string()))
    }

    pub fn sort_tree(&self, alias: Option<&str>, tree: CommentTree<C>) -> Result<CommentTree<C>> {
        self.get(alias)?.sort_tree(tree)
    }

    pub fn sort_tree_in_place(
        &self,
        alias: Option<&str>,
        nodes: &mut [CommentNode<C>],
    ) -> Result<()> {
        self.get(alias)?.sort_tree_in_place(nodes)
    }

    pub fn sort_flat(&self, alias: Option<&str>, comments: Vec<C>) -> Result<Vec<C>> {
        self.get(alias)?.sort_flat(comments)
    }
}

impl<C> SortingRegistry<C>
where
    C: HasUpdatedAt + HasScore + 'static,
{
    /// Registers a built-in strategy under `alias`.
    pub fn register_kind(
        &mut self,
        alias: impl Into<String>,
        kind: StrategyKind,
        direction: Direction,
        options: SortOptions,
    ) -> &mut Self {
        let sorter = DirectedSorter::new(kind.comparator::<C>(), direction).with_options(options);
        self.register(alias, sorter)
    }

    /// Registry with the stock aliases: `date_asc`, `date_desc` (default)
    /// and `score_desc`.
    pub fn builtin() -> Self {
        let mut registry = Self::new(DATE_DESC);
        registry
            .register_kind(
                DATE_ASC,
                StrategyKind::CreatedAt,
                Direction::Ascending,
                SortOptions::default(),
            )
            .register_kind(
                DATE_DESC,
                StrategyKind::CreatedAt,
                Direction::Descending,
                SortOptions::default(),
            )
            .register_kind(
                SCORE_DESC,
                StrategyKind::Score,
                Direction::Descending,
                SortOptions::default(),
            );
        registry
    }
}
