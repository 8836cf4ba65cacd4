/// Handle for one requested frame callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameToken(u64);

impl FrameToken {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Issues frame tokens, like a display's refresh callback queue.
pub trait FrameScheduler {
    fn request_frame(&mut self) -> FrameToken;

    /// Withdraw a request. Unknown or already-delivered tokens are ignored.
    fn cancel_frame(&mut self, token: FrameToken);
}

/// FIFO of requested frames, drained once per display refresh.
#[derive(Debug, Default)]
pub struct FrameQueue {
    next_id: u64,
    pending: Vec<FrameToken>,
    requested: u64,
    cancelled: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return every token due this refresh. Tokens requested
    /// while the returned batch is dispatched land in the next batch.
    pub fn take_due(&mut self) -> Vec<FrameToken> {
        std::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.contains(&token)
    }

    /// Total tokens ever issued.
    pub fn requested(&self) -> u64 {
        self.requested
    }

    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) -> FrameToken {
        self.next_id += 1;
        self.requested += 1;
        let token = FrameToken(self.next_id);
        self.pending.push(token);
        token
    }

    fn cancel_frame(&mut self, token: FrameToken) {
        let before = self.pending.len();
        self.pending.retain(|t| *t != token);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}
