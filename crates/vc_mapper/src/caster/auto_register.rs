use crate::caster::CasterRegistry;

/// A registration function collected by [`submit_caster!`](crate::submit_caster).
#[doc(hidden)]
pub struct CasterRegistration(pub fn(&mut CasterRegistry));

inventory::collect!(CasterRegistration);

pub(crate) fn register_all(registry: &mut CasterRegistry) {
    let mut count = 0_usize;
    for registration in inventory::iter::<CasterRegistration> {
        (registration.0)(registry);
        count += 1;
    }
    log::debug!("{count} static caster registrations applied");
}
