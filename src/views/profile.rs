use super::escape;
use crate::dom::Document;
use crate::models::UserProfile;
use crate::router::ids;

/// Sidebar name, plan and avatar.
pub fn render(doc: &mut Document, profile: &UserProfile) {
    let (name, _) = profile.display_name_and_initials();
    doc.set_html(ids::USER_NAME, escape(&name));
    doc.set_html(ids::USER_PLAN, escape(profile.plan_label()));
    let avatar = doc.control_mut(ids::USER_AVATAR);
    avatar.value = profile.avatar_url();
    avatar.label = format!("{} Avatar", name);
}
