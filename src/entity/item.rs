//! Item entities: one or more reconstructed models shown one at a time.

use crate::error::Result;
use crate::resolver::ModelResolver;
use crate::scene::{Node, NodeRef};
use crate::session::Session;
use crate::types::strip_namespace;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval_at, Duration, Instant};

/// Callback run once a spawned item has finished loading.
pub type OnLoad = Box<dyn FnOnce(&NodeRef)>;

/// Which child of an item is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cycler {
    index: usize,
    len: usize,
}

impl Cycler {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Move to the next child, wrapping around.
    pub fn advance(&mut self) -> usize {
        if self.len > 0 {
            self.index = (self.index + 1) % self.len;
        }
        self.index
    }

    /// Show the current child and hide the others.
    pub fn apply(&self, node: &Node) {
        for (i, child) in node.children().iter().enumerate() {
            child.borrow_mut().visible = i == self.index;
        }
    }
}

struct ItemState {
    node: NodeRef,
    cycler: RefCell<Cycler>,
    cycle_task: RefCell<Option<JoinHandle<()>>>,
}

impl ItemState {
    fn stop(&self) {
        if let Some(handle) = self.cycle_task.borrow_mut().take() {
            handle.abort();
        }
    }
}

/// Attach loaded children and start cycling if there is more than one.
fn populate(state: &Rc<ItemState>, children: Vec<NodeRef>, period: Duration) {
    let count = children.len();
    {
        let mut node = state.node.borrow_mut();
        for child in children {
            node.add(child);
        }
        *state.cycler.borrow_mut() = Cycler::new(count);
        state.cycler.borrow().apply(&node);
    }

    if count > 1 {
        let handle = tokio::task::spawn_local(cycle(Rc::downgrade(state), period));
        *state.cycle_task.borrow_mut() = Some(handle);
    }
}

async fn cycle(state: Weak<ItemState>, period: Duration) {
    let mut ticker = interval_at(Instant::now() + period, period);
    loop {
        ticker.tick().await;
        let Some(state) = state.upgrade() else {
            break;
        };
        let mut cycler = state.cycler.borrow_mut();
        cycler.advance();
        cycler.apply(&state.node.borrow());
    }
}

/// Reconstruct every name concurrently and return the nodes in name order.
async fn build_children(session: &Rc<Session>, names: &[String]) -> Result<Vec<NodeRef>> {
    let mut tasks = JoinSet::new();
    for (index, name) in names.iter().enumerate() {
        let session = Rc::clone(session);
        let name = name.clone();
        tasks.spawn_local(async move {
            let node = ModelResolver::new(&session).reconstruct(&name).await;
            (index, node)
        });
    }

    let mut children: Vec<Option<NodeRef>> = vec![None; names.len()];
    while let Some(joined) = tasks.join_next().await {
        let (index, node) = joined?;
        children[index] = Some(node?);
    }
    Ok(children.into_iter().flatten().collect())
}

/// A scene entity showing one or more item models.
///
/// With several names the visible model changes every cycle interval.
/// Loading and cycling run as local tasks, so items must be created inside
/// a [`tokio::task::LocalSet`].
pub struct Item {
    names: Vec<String>,
    state: Rc<ItemState>,
    load_task: Option<JoinHandle<()>>,
}

impl Item {
    fn empty(names: &[impl AsRef<str>]) -> Self {
        let display_name = names.first().map(|n| n.as_ref()).unwrap_or_default();
        let names = names
            .iter()
            .map(|name| strip_namespace(name.as_ref()).to_string())
            .collect();

        Self {
            names,
            state: Rc::new(ItemState {
                node: Node::group(display_name).into_ref(),
                cycler: RefCell::new(Cycler::new(0)),
                cycle_task: RefCell::new(None),
            }),
            load_task: None,
        }
    }

    /// Load every model and return the populated item.
    pub async fn load(session: &Rc<Session>, names: &[impl AsRef<str>]) -> Result<Self> {
        let item = Self::empty(names);
        let children = build_children(session, &item.names).await?;
        populate(&item.state, children, session.config().cycle_interval());
        Ok(item)
    }

    /// Start loading in the background and return the still-empty item.
    ///
    /// `on_load` runs once the children are attached. A failed load is
    /// logged and leaves the node empty.
    pub fn spawn(session: &Rc<Session>, names: &[impl AsRef<str>], on_load: Option<OnLoad>) -> Self {
        let mut item = Self::empty(names);

        let session = Rc::clone(session);
        let names = item.names.clone();
        let state = Rc::downgrade(&item.state);
        item.load_task = Some(tokio::task::spawn_local(async move {
            match build_children(&session, &names).await {
                Ok(children) => {
                    let Some(state) = state.upgrade() else {
                        return;
                    };
                    populate(&state, children, session.config().cycle_interval());
                    if let Some(on_load) = on_load {
                        on_load(&state.node);
                    }
                }
                Err(e) => log::error!("Failed to load item {}: {}", names.join(", "), e),
            }
        }));

        item
    }

    /// Names with the `minecraft:` namespace removed.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The item's scene node.
    pub fn node(&self) -> NodeRef {
        Rc::clone(&self.state.node)
    }

    /// Index of the visible child.
    pub fn visible_index(&self) -> usize {
        self.state.cycler.borrow().index()
    }

    /// Whether the cycle timer is running.
    pub fn is_cycling(&self) -> bool {
        self.state
            .cycle_task
            .borrow()
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    pub fn set_position(&self, position: [f32; 3]) {
        self.state.node.borrow_mut().transform.translation = position.into();
    }

    /// Stop the timer, cancel a pending load and drop every child model.
    pub fn dispose(&mut self) {
        if let Some(handle) = self.load_task.take() {
            handle.abort();
        }
        self.state.stop();
        drop(self.state.node.borrow_mut().take_children());
    }
}

impl Drop for Item {
    fn drop(&mut self) {
        if let Some(handle) = self.load_task.take() {
            handle.abort();
        }
        self.state.stop();
    }
}
