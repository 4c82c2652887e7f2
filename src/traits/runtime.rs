/// # Trait `RuntimeExt`
///
/// Define el **ciclo de vida y gestión** de un runtime de entrada completo.
///
/// Este trait representa la capa más alta de abstracción del sistema de input:
/// un runtime que mantiene hilos de sondeo en segundo plano para:
///
/// 1. **Escuchar** eventos del backend nativo (evdev, joystick, mensajes de ventana...)
/// 2. **Traducir** esos eventos usando [`KeyExt`](crate::KeyExt) y [`KeyStateExt`](crate::KeyStateExt)
/// 3. **Actualizar** el agregado compartido que se consulta con [`InputStateExt`](crate::InputStateExt)
///
/// ## Responsabilidades
///
/// - ✅ Gestionar el ciclo de vida del sistema de input (init, update, shutdown)
/// - ✅ Arrancar y detener los hilos de captura
/// - ✅ Publicar un snapshot consistente en cada `update()`
/// - ✅ Proveer información de monitoreo y diagnóstico
/// - ❌ **NO** maneja el game loop principal (eso es responsabilidad del motor)
///
/// ## Diagrama conceptual
///
/// ```text
/// ┌──────────────────────────────────────────────────────────────┐
/// │                      Input Runtime                           │
/// │                                                              │
/// │  ┌──────────────┐   ┌──────────────┐   ┌──────────────┐      │
/// │  │ OS Backend   │ → │ KeyExt +     │ → │ Agregado     │      │
/// │  │ (hilo propio)│   │ KeyStateExt  │   │ (un lock)    │      │
/// │  └──────────────┘   └──────────────┘   └──────────────┘      │
/// │                                               ▲              │
/// │                                 update() ─────┘ (1 por frame)│
/// └──────────────────────────────────────────────────────────────┘
///                             ▲
///                             │ InputStateExt
///                     ┌───────┴────────┐
///                     │  Game loop     │
///                     └────────────────┘
/// ```
///
/// ## Ejemplo
///
/// ```rust
/// use orbit_input::{InputConfig, InputEngine, RuntimeExt};
///
/// let mut engine = InputEngine::builder(InputConfig::default()).build();
/// engine.initialize().unwrap();
/// assert!(engine.is_running());
///
/// engine.update();
///
/// engine.shutdown();
/// engine.shutdown(); // idempotente
/// assert!(!engine.is_running());
/// ```
pub trait RuntimeExt {
    /// Tipo de error retornado por el runtime.
    type Error;

    /// Vista compartida del estado, clonable y enviable a otros hilos.
    type Handle: Clone + Send + Sync + 'static;

    /// Retorna una nueva vista del estado compartido.
    fn handle(&self) -> Self::Handle;

    // ==================== INICIALIZACIÓN Y CONTROL ====================

    /// Abre dispositivos y arranca los hilos de captura.
    ///
    /// Un dispositivo que no se puede abrir **no** es un error: el runtime
    /// registra un aviso y sigue con la capacidad degradada. Sólo falla si
    /// no se puede crear un hilo; en ese caso los hilos ya creados se detienen
    /// antes de retornar.
    ///
    /// Llamarlo sobre un runtime ya activo no hace nada.
    fn initialize(&mut self) -> Result<(), Self::Error>;

    /// Paso de frame: la **barrera de sincronización** entre productores y la aplicación.
    ///
    /// Recibe `&mut self`: dos `update()` concurrentes son imposibles por construcción.
    fn update(&mut self);

    /// Detiene todos los hilos y cierra los dispositivos.
    ///
    /// Idempotente, y seguro aunque nunca se haya conectado nada.
    fn shutdown(&mut self);

    /// Reinicia la captura de eventos.
    ///
    /// Útil cuando:
    /// - Un dispositivo se reconecta
    /// - Se necesita recargar la configuración
    /// - Hubo un error recuperable
    fn restart(&mut self) -> Result<(), Self::Error> {
        self.shutdown();
        self.initialize()
    }

    // ==================== MONITOREO Y ESTADO ====================

    /// Retorna `true` si el runtime se encuentra activo (capturando eventos).
    fn is_running(&self) -> bool;

    /// Retorna la cantidad de muestras aplicadas desde la creación del runtime.
    ///
    /// Útil para:
    /// - Debugging
    /// - Estadísticas de rendimiento
    /// - Detección de problemas (ej: contador no aumenta = backend congelado)
    fn events_processed(&self) -> u64;

    /// Retorna una descripción textual de los backends activos.
    ///
    /// # Ejemplo
    ///
    /// ```rust,ignore
    /// log::info!("Backend: {}", runtime.backend_name());
    /// // Output: "evdev+joystick" o "virtual"
    /// ```
    fn backend_name(&self) -> &str;

    /// Reinicia el estado de entrada **sin detener el runtime**.
    ///
    /// Suelta todas las teclas y botones y pone a cero deltas y ejes.
    /// Los mandos conectados siguen conectados.
    ///
    /// Útil cuando:
    /// - Se cambia de escena/nivel
    /// - Se pausa el juego
    /// - La ventana pierde el foco
    fn reset_state(&mut self);
}
