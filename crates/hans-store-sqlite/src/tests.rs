//! Integration tests for `SqliteStore` against an in-memory database.

use hans_core::{
  audit::Actor,
  location::{CareProviderLocationUpdate, NewCareProviderLocation},
  manager::{NewRegisteredManager, RegisteredManagerUpdate},
  recipient::{CareRecipientUpdate, NewCareRecipient},
  store::DirectoryStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn new_manager() -> NewRegisteredManager {
  NewRegisteredManager {
    given_name:  "Jehosephat".into(),
    family_name: "McGibbons".into(),
    email:       "jehosephat.mcgibbons@nhs.net".into(),
    cqc_registered_manager_id: "1-10000001".into(),
  }
}

fn new_location(manager_id: Uuid) -> NewCareProviderLocation {
  NewCareProviderLocation {
    name:        "My Location Name".into(),
    email:       "nosuchaddress@nhs.net".into(),
    ods_code:    "VNJNK".into(),
    cqc_location_id: "1-11086090064".into(),
    manager_id,
  }
}

fn new_recipient(location_id: Uuid) -> NewCareRecipient {
  NewCareRecipient {
    location_id,
    nhs_number:  "password".into(),
    subscription_id: "42".into(),
    provider_reference_id: "WANT45320482".into(),
  }
}

// ─── Registered managers ─────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_manager() {
  let s = store().await;

  let manager = s.create_manager(new_manager(), None).await.unwrap();
  assert_eq!(manager.given_name, "Jehosephat");

  let fetched = s.get_manager(manager.manager_id).await.unwrap().unwrap();
  assert_eq!(fetched.manager_id, manager.manager_id);
  assert_eq!(fetched.email, "jehosephat.mcgibbons@nhs.net");
  assert_eq!(fetched.cqc_registered_manager_id, "1-10000001");
}

#[tokio::test]
async fn get_manager_missing_returns_none() {
  let s = store().await;
  let result = s.get_manager(Uuid::new_v4()).await.unwrap();
  assert!(result.is_none());
}

#[tokio::test]
async fn list_managers_sorted_by_name() {
  let s = store().await;
  let mut b = new_manager();
  b.family_name = "Zephyr".into();
  b.email = "z@nhs.net".into();
  s.create_manager(b, None).await.unwrap();
  s.create_manager(new_manager(), None).await.unwrap();

  let all = s.list_managers().await.unwrap();
  assert_eq!(all.len(), 2);
  assert_eq!(all[0].family_name, "McGibbons");
  assert_eq!(all[1].family_name, "Zephyr");
}

#[tokio::test]
async fn manager_email_is_unique() {
  let s = store().await;
  s.create_manager(new_manager(), None).await.unwrap();

  let mut duplicate = new_manager();
  duplicate.given_name = "Other".into();
  assert!(s.create_manager(duplicate, None).await.is_err());
}

#[tokio::test]
async fn create_stamps_actor() {
  let s = store().await;
  let manager = s
    .create_manager(new_manager(), Some(Actor("admin@nhs.net".into())))
    .await
    .unwrap();

  let fetched = s.get_manager(manager.manager_id).await.unwrap().unwrap();
  assert_eq!(fetched.audit.created_by, Some(Actor("admin@nhs.net".into())));
  assert_eq!(fetched.audit.updated_by, None);
}

#[tokio::test]
async fn update_manager_stamps_only_when_changed() {
  let s = store().await;
  let manager = s.create_manager(new_manager(), None).await.unwrap();

  // Same fields: no stamp.
  let same = RegisteredManagerUpdate {
    given_name:  manager.given_name.clone(),
    family_name: manager.family_name.clone(),
    email:       manager.email.clone(),
    cqc_registered_manager_id: manager.cqc_registered_manager_id.clone(),
  };
  let unchanged = s
    .update_manager(manager.manager_id, same, Some(Actor("editor@nhs.net".into())))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(unchanged.audit.updated_by, None);
  assert_eq!(unchanged.audit.updated_at, manager.audit.updated_at);

  // Changed field: stamped.
  let changed = RegisteredManagerUpdate {
    given_name:  "Aislinn".into(),
    family_name: "Mullen".into(),
    email:       manager.email.clone(),
    cqc_registered_manager_id: manager.cqc_registered_manager_id.clone(),
  };
  let updated = s
    .update_manager(manager.manager_id, changed, Some(Actor("editor@nhs.net".into())))
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.given_name, "Aislinn");
  assert_eq!(updated.audit.updated_by, Some(Actor("editor@nhs.net".into())));
  assert!(updated.audit.updated_at > manager.audit.updated_at);

  let fetched = s.get_manager(manager.manager_id).await.unwrap().unwrap();
  assert_eq!(fetched.given_name, "Aislinn");
}

#[tokio::test]
async fn update_manager_missing_returns_none() {
  let s = store().await;
  let result = s
    .update_manager(
      Uuid::new_v4(),
      RegisteredManagerUpdate {
        given_name:  "A".into(),
        family_name: "B".into(),
        email:       "a.b@nhs.net".into(),
        cqc_registered_manager_id: "1-1".into(),
      },
      None,
    )
    .await
    .unwrap();
  assert!(result.is_none());
}

// ─── Care provider locations ─────────────────────────────────────────────────

#[tokio::test]
async fn location_requires_existing_manager() {
  let s = store().await;
  // No manager with this id exists; the foreign key must fail the write.
  let result = s.create_location(new_location(Uuid::new_v4()), None).await;
  assert!(result.is_err());
}

#[tokio::test]
async fn location_saves_with_a_manager() {
  let s = store().await;
  let manager = s.create_manager(new_manager(), None).await.unwrap();

  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  assert_eq!(location.manager_id, manager.manager_id);

  let fetched = s.get_location(location.location_id).await.unwrap().unwrap();
  assert_eq!(fetched.name, "My Location Name");
  assert_eq!(fetched.ods_code, "VNJNK");
}

#[tokio::test]
async fn location_unique_fields_are_enforced() {
  let s = store().await;
  let manager = s.create_manager(new_manager(), None).await.unwrap();
  s.create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();

  // Same email.
  let mut dup = new_location(manager.manager_id);
  dup.ods_code = "OTHER".into();
  dup.cqc_location_id = "1-999".into();
  assert!(s.create_location(dup, None).await.is_err());

  // Same ods_code.
  let mut dup = new_location(manager.manager_id);
  dup.email = "other@nhs.net".into();
  dup.cqc_location_id = "1-999".into();
  assert!(s.create_location(dup, None).await.is_err());

  // Same cqc_location_id.
  let mut dup = new_location(manager.manager_id);
  dup.email = "other@nhs.net".into();
  dup.ods_code = "OTHER".into();
  assert!(s.create_location(dup, None).await.is_err());
}

#[tokio::test]
async fn deleting_manager_cascades_to_locations_and_recipients() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  let recipient = s
    .create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();

  assert!(s.delete_manager(manager.manager_id).await.unwrap());

  assert!(s.get_location(location.location_id).await.unwrap().is_none());
  assert!(s.get_recipient(recipient.recipient_id).await.unwrap().is_none());
}

#[tokio::test]
async fn delete_manager_missing_returns_false() {
  let s = store().await;
  assert!(!s.delete_manager(Uuid::new_v4()).await.unwrap());
}

#[tokio::test]
async fn update_location_can_move_to_another_manager() {
  let s = store().await;
  let first  = s.create_manager(new_manager(), None).await.unwrap();
  let mut other = new_manager();
  other.email = "other.manager@nhs.net".into();
  let second = s.create_manager(other, None).await.unwrap();

  let location = s
    .create_location(new_location(first.manager_id), None)
    .await
    .unwrap();

  let updated = s
    .update_location(
      location.location_id,
      CareProviderLocationUpdate {
        name:        location.name.clone(),
        email:       location.email.clone(),
        ods_code:    location.ods_code.clone(),
        cqc_location_id: location.cqc_location_id.clone(),
        manager_id:  second.manager_id,
      },
      None,
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.manager_id, second.manager_id);
}

// ─── Care recipients ─────────────────────────────────────────────────────────

#[tokio::test]
async fn recipient_stores_nhs_number_as_hash() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();

  let recipient = s
    .create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();
  assert_eq!(
    recipient.nhs_number_hash.as_str(),
    "c0067d4af4e87f00dbac63b6156828237059172d1bbeac67427345d6a9fda484"
  );

  let fetched = s
    .get_recipient(recipient.recipient_id)
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.nhs_number_hash, recipient.nhs_number_hash);
}

#[tokio::test]
async fn recipient_rejects_empty_nhs_number() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();

  let mut input = new_recipient(location.location_id);
  input.nhs_number = "".into();
  assert!(s.create_recipient(input, None).await.is_err());
}

#[tokio::test]
async fn recipient_pseudonym_is_unique() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  s.create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();

  // Same NHS number, different subscription: same hash, rejected.
  let mut dup = new_recipient(location.location_id);
  dup.subscription_id = "43".into();
  dup.provider_reference_id = "WANT99999999".into();
  assert!(s.create_recipient(dup, None).await.is_err());
}

#[tokio::test]
async fn update_recipient_rehashes_supplied_identifier() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  let recipient = s
    .create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();

  let updated = s
    .update_recipient(
      recipient.recipient_id,
      CareRecipientUpdate {
        location_id: recipient.location_id,
        nhs_number:  Some("super-sekrit".into()),
        provider_reference_id: recipient.provider_reference_id.clone(),
      },
      None,
    )
    .await
    .unwrap()
    .unwrap();
  assert_ne!(updated.nhs_number_hash, recipient.nhs_number_hash);
  // subscription_id is not updatable.
  assert_eq!(updated.subscription_id, recipient.subscription_id);
}

#[tokio::test]
async fn update_recipient_without_identifier_keeps_hash() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  let recipient = s
    .create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();

  let updated = s
    .update_recipient(
      recipient.recipient_id,
      CareRecipientUpdate {
        location_id: recipient.location_id,
        nhs_number:  None,
        provider_reference_id: "WANT00000001".into(),
      },
      None,
    )
    .await
    .unwrap()
    .unwrap();
  assert_eq!(updated.nhs_number_hash, recipient.nhs_number_hash);
  assert_eq!(updated.provider_reference_id, "WANT00000001");
}

// ─── Pseudonym lookup ────────────────────────────────────────────────────────

#[tokio::test]
async fn find_location_by_pseudonym_resolves_owner() {
  let s = store().await;
  let manager  = s.create_manager(new_manager(), None).await.unwrap();
  let location = s
    .create_location(new_location(manager.manager_id), None)
    .await
    .unwrap();
  let recipient = s
    .create_recipient(new_recipient(location.location_id), None)
    .await
    .unwrap();

  let found = s
    .find_location_by_pseudonym(recipient.nhs_number_hash.as_str())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(found.location_id, location.location_id);
  assert_eq!(found.name, "My Location Name");
  assert_eq!(found.email, "nosuchaddress@nhs.net");
}

#[tokio::test]
async fn find_location_by_unknown_pseudonym_returns_none() {
  let s = store().await;
  let result = s
    .find_location_by_pseudonym("not_existing_id")
    .await
    .unwrap();
  assert!(result.is_none());
}
