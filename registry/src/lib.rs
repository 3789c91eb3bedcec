use std::rc::Rc;

use adapter::database::Database;
use adapter::repository::{
    payment::PaymentRepositoryImpl, reservation::ReservationRepositoryImpl,
    slot::SlotRepositoryImpl, user::UserRepositoryImpl, vehicle::VehicleRepositoryImpl,
};
use kernel::repository::{
    payment::PaymentRepository, reservation::ReservationRepository, slot::SlotRepository,
    user::UserRepository, vehicle::VehicleRepository,
};
use shared::config::{AdminConfig, AppConfig};
use shared::error::AppResult;

#[derive(Clone)]
pub struct AppRegistry {
    db: Database,
    admin: Option<AdminConfig>,
    user_repository: Rc<dyn UserRepository>,
    vehicle_repository: Rc<dyn VehicleRepository>,
    slot_repository: Rc<dyn SlotRepository>,
    reservation_repository: Rc<dyn ReservationRepository>,
    payment_repository: Rc<dyn PaymentRepository>,
}

impl AppRegistry {
    pub fn new(db: Database, app_config: AppConfig) -> Self {
        let user_repository = Rc::new(UserRepositoryImpl::new(db.clone()));
        let vehicle_repository = Rc::new(VehicleRepositoryImpl::new(db.clone()));
        let slot_repository = Rc::new(SlotRepositoryImpl::new(db.clone()));
        let reservation_repository = Rc::new(ReservationRepositoryImpl::new(db.clone()));
        let payment_repository = Rc::new(PaymentRepositoryImpl::new(db.clone()));
        Self {
            db,
            admin: app_config.admin,
            user_repository,
            vehicle_repository,
            slot_repository,
            reservation_repository,
            payment_repository,
        }
    }

    pub fn user_repository(&self) -> Rc<dyn UserRepository> {
        self.user_repository.clone()
    }

    pub fn vehicle_repository(&self) -> Rc<dyn VehicleRepository> {
        self.vehicle_repository.clone()
    }

    pub fn slot_repository(&self) -> Rc<dyn SlotRepository> {
        self.slot_repository.clone()
    }

    pub fn reservation_repository(&self) -> Rc<dyn ReservationRepository> {
        self.reservation_repository.clone()
    }

    pub fn payment_repository(&self) -> Rc<dyn PaymentRepository> {
        self.payment_repository.clone()
    }

    /// `None` when no administrator credentials are configured.
    pub fn admin_config(&self) -> Option<&AdminConfig> {
        self.admin.as_ref()
    }

    // 現在のメモリ上の状態をすべてのデータファイルへ書き出す
    pub fn persist(&self) -> AppResult<()> {
        self.db.persist()
    }
}
