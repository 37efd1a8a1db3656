use heartscroll_protocol::Effect;

/// Receiver for effects emitted by sequencers and scenes.
///
/// Effects are fire-and-forget: the core never reads anything back.
pub trait EffectSink {
    fn emit(&mut self, effect: Effect);
}

impl EffectSink for Vec<Effect> {
    fn emit(&mut self, effect: Effect) {
        self.push(effect);
    }
}

/// Sink that drops everything, for callers that only want state changes.
#[derive(Debug, Default, Clone, Copy)]
pub struct Discard;

impl EffectSink for Discard {
    fn emit(&mut self, _effect: Effect) {}
}
