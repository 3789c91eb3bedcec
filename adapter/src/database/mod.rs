use std::{
    cell::{Ref, RefCell, RefMut},
    collections::BTreeMap,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
    rc::Rc,
};

use kernel::model::{
    id::{PaymentId, ReservationId, SlotId, UserId, VehicleId},
    payment::Payment,
    reservation::Reservation,
    slot::Slot,
    user::User,
    vehicle::Vehicle,
};
use shared::{
    config::StorageConfig,
    error::{AppError, AppResult},
};

pub mod model;

use model::{
    payment::PaymentRow, reservation::ReservationRow, slot::SlotRow, user::UserRow,
    vehicle::VehicleRow, Record,
};

/// In-memory copy of every data file, keyed by id.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Tables {
    pub users: BTreeMap<UserId, User>,
    pub vehicles: BTreeMap<VehicleId, Vehicle>,
    pub slots: BTreeMap<SlotId, Slot>,
    pub reservations: BTreeMap<ReservationId, Reservation>,
    pub payments: BTreeMap<PaymentId, Payment>,
}

// 採番は「既存の最大 ID + 1」。欠番は再利用しない
macro_rules! next_id {
    ($name: ident, $table: ident, $id_type: ty) => {
        pub fn $name(&self) -> $id_type {
            self.$table
                .keys()
                .next_back()
                .map(|id| id.next())
                .unwrap_or(<$id_type>::FIRST)
        }
    };
}

impl Tables {
    pub fn with_initial_slots() -> Self {
        Self {
            slots: Slot::initial_layout()
                .into_iter()
                .map(|s| (s.slot_id, s))
                .collect(),
            ..Default::default()
        }
    }

    next_id!(next_user_id, users, UserId);
    next_id!(next_vehicle_id, vehicles, VehicleId);
    next_id!(next_reservation_id, reservations, ReservationId);
    next_id!(next_payment_id, payments, PaymentId);

    pub fn has_completed_payment(&self, reservation_id: ReservationId) -> bool {
        self.payments
            .values()
            .any(|p| p.reservation_id == reservation_id && p.is_completed())
    }
}

#[derive(Clone)]
pub struct Database {
    tables: Rc<RefCell<Tables>>,
    storage: Option<StorageConfig>,
}

impl Database {
    /// A database that never touches the filesystem.
    pub fn in_memory(tables: Tables) -> Self {
        Self {
            tables: Rc::new(RefCell::new(tables)),
            storage: None,
        }
    }

    pub fn read(&self) -> Ref<'_, Tables> {
        self.tables.borrow()
    }

    pub fn write(&self) -> RefMut<'_, Tables> {
        self.tables.borrow_mut()
    }

    /// Rewrites every data file from the in-memory tables.
    pub fn persist(&self) -> AppResult<()> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };
        let tables = self.read();
        write_table(
            &storage.users_path(),
            tables.users.values().cloned().map(UserRow),
        )?;
        write_table(
            &storage.vehicles_path(),
            tables.vehicles.values().cloned().map(VehicleRow),
        )?;
        write_table(
            &storage.slots_path(),
            tables.slots.values().cloned().map(SlotRow),
        )?;
        write_table(
            &storage.reservations_path(),
            tables.reservations.values().cloned().map(ReservationRow),
        )?;
        write_table(
            &storage.payments_path(),
            tables.payments.values().cloned().map(PaymentRow),
        )?;
        tracing::debug!(
            users = tables.users.len(),
            vehicles = tables.vehicles.len(),
            reservations = tables.reservations.len(),
            payments = tables.payments.len(),
            "data saved"
        );
        Ok(())
    }
}

pub fn connect_database_with(cfg: &StorageConfig) -> AppResult<Database> {
    if !cfg.data_dir.exists() {
        fs::create_dir_all(&cfg.data_dir).map_err(|source| AppError::PersistenceError {
            path: cfg.data_dir.clone(),
            source,
        })?;
    }

    let mut tables = Tables::default();
    tables.users = load_table::<UserRow, _, _>(&cfg.users_path(), |u: &User| u.user_id)?
        .unwrap_or_default();
    tables.vehicles =
        load_table::<VehicleRow, _, _>(&cfg.vehicles_path(), |v: &Vehicle| v.vehicle_id)?
            .unwrap_or_default();
    // slots.txt が無ければ初期配置から始める
    tables.slots = match load_table::<SlotRow, _, _>(&cfg.slots_path(), |s: &Slot| s.slot_id)? {
        Some(slots) => slots,
        None => {
            tracing::info!("slots file not found, initializing default layout");
            Tables::with_initial_slots().slots
        }
    };
    tables.reservations = load_table::<ReservationRow, _, _>(
        &cfg.reservations_path(),
        |r: &Reservation| r.reservation_id,
    )?
    .unwrap_or_default();
    tables.payments =
        load_table::<PaymentRow, _, _>(&cfg.payments_path(), |p: &Payment| p.payment_id)?
            .unwrap_or_default();
    check_slot_holders(&tables, cfg)?;

    tracing::info!(
        users = tables.users.len(),
        vehicles = tables.vehicles.len(),
        slots = tables.slots.len(),
        reservations = tables.reservations.len(),
        payments = tables.payments.len(),
        "data loaded"
    );

    Ok(Database {
        tables: Rc::new(RefCell::new(tables)),
        storage: Some(cfg.clone()),
    })
}

fn load_table<R, T, K>(path: &Path, key: impl Fn(&T) -> K) -> AppResult<Option<BTreeMap<K, T>>>
where
    R: Record + Into<T>,
    K: Ord + std::fmt::Display,
{
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(AppError::PersistenceError {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let mut table = BTreeMap::new();
    for (idx, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: T = R::parse_line(line)
            .map_err(|e| {
                AppError::ConversionEntityError(format!(
                    "{}:{}: {}",
                    path.display(),
                    idx + 1,
                    e
                ))
            })?
            .into();
        let id = key(&record);
        if table.contains_key(&id) {
            return Err(AppError::ConversionEntityError(format!(
                "{}:{}: duplicate id {}",
                path.display(),
                idx + 1,
                id
            )));
        }
        table.insert(id, record);
    }
    Ok(Some(table))
}

// 有効な予約と保持中の枠は 1 対 1 で対応していなければならない
fn check_slot_holders(tables: &Tables, cfg: &StorageConfig) -> AppResult<()> {
    let inconsistent = |path: PathBuf, msg: String| {
        AppError::ConversionEntityError(format!("{}: {}", path.display(), msg))
    };

    let mut held = BTreeMap::new();
    for r in tables.reservations.values().filter(|r| r.is_active()) {
        let holds = tables
            .slots
            .get(&r.slot_id)
            .and_then(Slot::holder)
            .is_some_and(|h| h.vehicle_id == r.vehicle_id && h.user_id == r.user_id);
        if !holds {
            return Err(inconsistent(
                cfg.reservations_path(),
                format!(
                    "active reservation {} does not hold slot {}",
                    r.reservation_id, r.slot_id
                ),
            ));
        }
        if let Some(other) = held.insert(r.slot_id, r.reservation_id) {
            return Err(inconsistent(
                cfg.reservations_path(),
                format!(
                    "reservations {} and {} are both active on slot {}",
                    other, r.reservation_id, r.slot_id
                ),
            ));
        }
    }

    match tables
        .slots
        .values()
        .find(|s| !s.is_available() && !held.contains_key(&s.slot_id))
    {
        Some(slot) => Err(inconsistent(
            cfg.slots_path(),
            format!(
                "slot {} is {} without an active reservation",
                slot.slot_id,
                slot.status()
            ),
        )),
        None => Ok(()),
    }
}

// 一時ファイルに書き出してから rename し、保存途中で落ちても元のファイルを壊さない
fn write_table<R: Record>(path: &Path, rows: impl Iterator<Item = R>) -> AppResult<()> {
    let tmp_path = path.with_extension("txt.tmp");
    let to_err = |source: io::Error| AppError::PersistenceError {
        path: path.to_path_buf(),
        source,
    };

    let mut file = io::BufWriter::new(fs::File::create(&tmp_path).map_err(to_err)?);
    for row in rows {
        writeln!(file, "{}", row.to_line()).map_err(to_err)?;
    }
    file.into_inner()
        .map_err(|e| to_err(e.into_error()))?
        .sync_all()
        .map_err(to_err)?;
    fs::rename(&tmp_path, path).map_err(to_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::slot::SlotStatus;
    use tempfile::tempdir;

    #[test]
    fn missing_files_start_with_default_layout() {
        let dir = tempdir().unwrap();
        let db = connect_database_with(&StorageConfig::new(dir.path())).unwrap();
        let tables = db.read();
        assert!(tables.users.is_empty());
        assert_eq!(tables.slots.len(), 100);
        assert!(tables
            .slots
            .values()
            .all(|s| s.status() == SlotStatus::Available));
    }

    #[test]
    fn next_id_is_one_past_the_maximum() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        fs::write(
            cfg.users_path(),
            "2 A 01711111111 a@b.com pw 2025-01-01_00:00:00 1\n\
             7 B 01722222222 b@b.com pw 2025-01-01_00:00:00 0\n",
        )
        .unwrap();
        let db = connect_database_with(&cfg).unwrap();
        assert_eq!(db.read().next_user_id(), UserId::new(8));
        assert_eq!(db.read().next_payment_id(), PaymentId::new(1));
    }

    #[test]
    fn malformed_line_reports_file_and_line() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        fs::write(
            cfg.payments_path(),
            "1 1 1 30.00 cash 2025-01-01_00:00:00 completed\n1 1 1 oops\n",
        )
        .unwrap();
        let err = connect_database_with(&cfg).err().unwrap();
        match err {
            AppError::ConversionEntityError(msg) => assert!(msg.contains("payments.txt:2")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        fs::write(
            cfg.vehicles_path(),
            "1 1 car DHA-1 red 2025-01-01_00:00:00\n1 1 car DHA-2 blue 2025-01-01_00:00:00\n",
        )
        .unwrap();
        assert!(matches!(
            connect_database_with(&cfg),
            Err(AppError::ConversionEntityError(_))
        ));
    }

    const USERS: &str = "5 Rahim 01700000005 five@mail.com pw 2025-01-01_00:00:00 1\n\
        6 Karim 01700000006 six@mail.com pw 2025-01-01_00:00:00 1\n";
    const VEHICLES: &str = "12 5 bike DHA-12 red 2025-01-01_00:00:00\n\
        13 6 bike DHA-13 blue 2025-01-01_00:00:00\n";
    const HELD_SLOT: &str = "1 bike reserved 12 2025-02-01_08:15:00 5\n";
    const ACTIVE_ON_SLOT_1: &str = "1 5 1 12 2025-02-01_08:15:00 - active 3.00 30.00\n";

    fn write_ledger(cfg: &StorageConfig, slots: &str, reservations: &str) {
        fs::write(cfg.users_path(), USERS).unwrap();
        fs::write(cfg.vehicles_path(), VEHICLES).unwrap();
        fs::write(cfg.slots_path(), slots).unwrap();
        fs::write(cfg.reservations_path(), reservations).unwrap();
    }

    fn load_error(cfg: &StorageConfig) -> String {
        match connect_database_with(cfg) {
            Err(AppError::ConversionEntityError(msg)) => msg,
            Err(other) => panic!("unexpected error {other:?}"),
            Ok(_) => panic!("inconsistent data was accepted"),
        }
    }

    #[test]
    fn consistent_holders_load() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        write_ledger(&cfg, HELD_SLOT, ACTIVE_ON_SLOT_1);
        let db = connect_database_with(&cfg).unwrap();
        assert_eq!(db.read().slots[&SlotId::new(1)].status(), SlotStatus::Reserved);
    }

    #[test]
    fn active_reservation_on_an_available_slot_is_rejected() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        write_ledger(&cfg, "1 bike available 0 - 0\n", ACTIVE_ON_SLOT_1);
        let msg = load_error(&cfg);
        assert!(msg.contains("reservations.txt"));
        assert!(msg.contains("does not hold slot 1"));
    }

    #[test]
    fn slot_held_by_another_vehicle_is_rejected() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        write_ledger(
            &cfg,
            "1 bike occupied 13 2025-02-01_08:15:00 6\n",
            ACTIVE_ON_SLOT_1,
        );
        assert!(load_error(&cfg).contains("does not hold slot 1"));
    }

    #[test]
    fn two_active_reservations_on_one_slot_are_rejected() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        let reservations = [
            ACTIVE_ON_SLOT_1,
            "2 5 1 12 2025-02-01_09:00:00 - active 1.00 10.00\n",
        ]
        .concat();
        write_ledger(&cfg, HELD_SLOT, &reservations);
        assert!(load_error(&cfg).contains("reservations 1 and 2 are both active on slot 1"));
    }

    #[test]
    fn held_slot_without_a_reservation_is_rejected() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        write_ledger(
            &cfg,
            HELD_SLOT,
            "1 5 1 12 2025-02-01_08:15:00 2025-02-01_09:00:00 cancelled 3.00 30.00\n",
        );
        let msg = load_error(&cfg);
        assert!(msg.contains("slots.txt"));
        assert!(msg.contains("slot 1 is reserved without an active reservation"));
    }

    #[test]
    fn persist_leaves_no_temp_files() {
        let dir = tempdir().unwrap();
        let cfg = StorageConfig::new(dir.path());
        let db = connect_database_with(&cfg).unwrap();
        db.persist().unwrap();

        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "payments.txt",
                "reservations.txt",
                "slots.txt",
                "users.txt",
                "vehicles.txt"
            ]
        );
        let slots = fs::read_to_string(cfg.slots_path()).unwrap();
        assert_eq!(slots.lines().count(), 100);
        assert_eq!(slots.lines().next(), Some("1 bike available 0 - 0"));
    }
}
