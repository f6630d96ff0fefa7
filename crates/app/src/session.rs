//! Session state for one signed-in actor
//!
//! Owns the local database handle, the resolved actor, the derived
//! conversation list, and the current selection. Every mutation funnels
//! through the same full aggregation pass: there is no optimistic
//! fast-path that could drift from the aggregator.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use curalink_core::{
    aggregate, identity, Account, ActorIdentity, ChangeBus, Collection, Conversation, Database,
    Result, StorageEvent,
};
use tokio::sync::broadcast;
use tracing::debug;

use crate::composer::{build_draft, SendOutcome};
use crate::mirror::RemoteMirror;

pub struct Session {
    db: Arc<Mutex<Database>>,
    bus: ChangeBus,
    actor: Option<ActorIdentity>,
    conversations: Vec<Conversation>,
    selected: Option<String>,
    mirror: Option<RemoteMirror>,
}

impl Session {
    pub fn new(db: Database) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            bus: ChangeBus::default(),
            actor: None,
            conversations: Vec::new(),
            selected: None,
            mirror: None,
        }
    }

    /// Attach a remote mirror for best-effort replication of appends
    pub fn with_mirror(mut self, mirror: RemoteMirror) -> Self {
        self.mirror = Some(mirror);
        self
    }

    /// Share a process-wide bus instead of a private one, so sessions in
    /// the same process observe each other's writes
    pub fn with_bus(mut self, bus: ChangeBus) -> Self {
        self.bus = bus;
        self
    }

    pub fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StorageEvent> {
        self.bus.subscribe()
    }

    pub fn actor(&self) -> Option<&ActorIdentity> {
        self.actor.as_ref()
    }

    /// Persist the account as `CurrentUser`, resolve the actor, and
    /// derive the conversation list. An unresolvable identity is not an
    /// error; the session simply has no conversations.
    pub fn sign_in(&mut self, account: Account) -> Result<()> {
        self.actor = identity::resolve(&account);
        {
            let db = self.db.lock().unwrap();
            db.account().save(&account)?;
        }
        self.selected = None;
        self.bus.publish(StorageEvent::AccountChanged);
        self.refresh()
    }

    pub fn sign_out(&mut self) -> Result<()> {
        {
            let db = self.db.lock().unwrap();
            db.account().clear()?;
        }
        self.actor = None;
        self.conversations.clear();
        self.selected = None;
        self.bus.publish(StorageEvent::AccountChanged);
        Ok(())
    }

    /// Re-read the full log and rebuild the conversation list.
    ///
    /// The selection is preserved when its conversation still exists;
    /// otherwise the most recently active conversation is selected.
    pub fn refresh(&mut self) -> Result<()> {
        self.conversations = match &self.actor {
            Some(actor) => {
                let db = self.db.lock().unwrap();
                let log = db.messages().load()?;
                aggregate(&log, actor)
            }
            None => Vec::new(),
        };

        let still_exists = self
            .selected
            .as_ref()
            .map(|id| self.conversations.iter().any(|c| &c.id == id))
            .unwrap_or(false);
        if !still_exists {
            self.selected = self.conversations.first().map(|c| c.id.clone());
        }

        Ok(())
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn selected_conversation(&self) -> Option<&Conversation> {
        let id = self.selected.as_ref()?;
        self.conversations.iter().find(|c| &c.id == id)
    }

    /// Select a conversation by counterparty id. Returns false when no
    /// such conversation exists.
    pub fn select(&mut self, id: &str) -> bool {
        if self.conversations.iter().any(|c| c.id == id) {
            self.selected = Some(id.to_string());
            true
        } else {
            false
        }
    }

    /// Validate and append one outbound message.
    ///
    /// Empty text, a missing selection, or a missing identity are quiet
    /// no-ops. On success the record is appended through the CAS path,
    /// mirrored best-effort, broadcast on the bus, and the conversation
    /// list is rebuilt through the aggregator.
    pub fn send_message(&mut self, text: &str) -> Result<SendOutcome> {
        let body = text.trim();
        if body.is_empty() {
            return Ok(SendOutcome::EmptyMessage);
        }
        let Some(conversation) = self.selected_conversation() else {
            return Ok(SendOutcome::NoConversation);
        };
        let Some(actor) = &self.actor else {
            return Ok(SendOutcome::NoIdentity);
        };

        let draft = build_draft(actor, conversation, body.to_string(), Utc::now())?;

        let record = {
            let db = self.db.lock().unwrap();
            db.messages().append(draft)?
        };
        debug!(seq = record.seq, to = %conversation.id, "Appended outbound message");

        if let Some(mirror) = &self.mirror {
            mirror.spawn_append(record.clone());
        }

        self.bus.publish(StorageEvent::MessageAppended(record.clone()));
        self.refresh()?;

        Ok(SendOutcome::Sent(record))
    }

    /// React to one storage event. Only message and account topics
    /// trigger a rebuild; sibling collections (cart, notifications, ...)
    /// are ignored here. Returns whether a refresh ran.
    pub fn handle_event(&mut self, event: &StorageEvent) -> Result<bool> {
        let relevant = Self::is_relevant(event);
        if relevant {
            self.refresh()?;
        }
        Ok(relevant)
    }

    fn is_relevant(event: &StorageEvent) -> bool {
        matches!(
            event,
            StorageEvent::MessageAppended(_)
                | StorageEvent::CollectionReplaced(Collection::Messages)
                | StorageEvent::AccountChanged
        )
    }

    /// Non-blocking pump: drain every pending event from a subscription
    /// and refresh at most once. Suits the cooperative single-threaded
    /// consumption model of the UI event loop.
    pub fn drain_events(
        &mut self,
        rx: &mut broadcast::Receiver<StorageEvent>,
    ) -> Result<usize> {
        let mut relevant = 0;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    if Self::is_relevant(&event) {
                        relevant += 1;
                    }
                }
                Err(broadcast::error::TryRecvError::Lagged(_)) => {
                    // Missed events; a full rebuild covers whatever they were
                    relevant += 1;
                }
                Err(_) => break,
            }
        }
        if relevant > 0 {
            self.refresh()?;
        }
        Ok(relevant)
    }

    /// Shared handle to the underlying database
    pub fn db(&self) -> Arc<Mutex<Database>> {
        self.db.clone()
    }
}
