/// Declare a service implementation whose collaborators are chosen by a
/// dependency trait.
///
/// ```ignore
/// gen_service_impl! {
///     struct CatalogServiceImpl: service::catalog::CatalogService = CatalogServiceDeps {
///         ShopDao: dao::shop::ShopDao = shop_dao
///     }
/// }
/// ```
///
/// expands to a `CatalogServiceDeps` trait with one associated type per
/// collaborator and a `CatalogServiceImpl<Deps>` struct holding each of them
/// behind an `Arc`.
#[macro_export]
macro_rules! gen_service_impl {
    (
        struct $service_name:ident : $trait:path = $dependencies:ident {
            $($field_name:ident: $field_type:path = $field_attr:ident),* $(,)?
        }
    ) => {
            pub trait $dependencies {
                $(
                    type $field_name: $field_type + Sync + Send;
                )*
            }

            pub struct $service_name<Deps: $dependencies> {
                $(
                    pub $field_attr: std::sync::Arc<Deps::$field_name>,
                )*
            }
    };
}
