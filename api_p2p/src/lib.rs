use actix_web::web::{self};

pub mod routes {
    pub mod offer;
}

mod services {
    pub(crate) mod offer;
}

mod dtos {
    pub(crate) mod offer;
}

pub fn mount_p2p() -> actix_web::Scope {
    web::scope("/p2p")
        .service(routes::offer::get_my_offers)
        .service(routes::offer::get_offers)
        .service(routes::offer::post_offer)
        .service(routes::offer::post_cancel_offer)
}
